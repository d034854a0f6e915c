use thiserror::Error;

#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub analyze: Option<String>,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("missing value for argument: {0}")]
    MissingValue(String),
    #[error("--prompt and --analyze are mutually exclusive")]
    ConflictingModes,
    #[error("help requested")]
    HelpRequested,
}

impl CliOptions {
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Self::default();

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => return Err(CliError::HelpRequested),
                "--model" => {
                    let value = iter.next().ok_or(CliError::MissingValue(arg.clone()))?;
                    options.model = Some(value);
                }
                "--prompt" => {
                    let value = iter.next().ok_or(CliError::MissingValue(arg.clone()))?;
                    options.prompt = Some(value);
                }
                "--analyze" => {
                    let value = iter.next().ok_or(CliError::MissingValue(arg.clone()))?;
                    options.analyze = Some(value);
                }
                unknown => return Err(CliError::UnknownArgument(unknown.to_string())),
            }
        }

        if options.prompt.is_some() && options.analyze.is_some() {
            return Err(CliError::ConflictingModes);
        }

        Ok(options)
    }
}
