mod cli;

use std::io::{BufRead, Read, Write};

use cli::{CliError, CliOptions};
use shared::llm::{
    ChatSession, ContentAnalysisKind, GeminiClient, GeminiConfig, LlmGatewayError, SamplingParams,
    analyze_content,
};

#[tokio::main]
async fn main() {
    let options = match CliOptions::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(CliError::HelpRequested) => {
            print_usage();
            std::process::exit(0);
        }
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    let config = match GeminiConfig::resolve(None, options.model.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let client = match GeminiClient::new(config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let outcome = if let Some(prompt) = options.prompt {
        run_prompt(&client, &prompt).await
    } else if let Some(tag) = options.analyze {
        run_analyze(&client, &tag).await
    } else {
        run_chat(client).await
    };

    if let Err(err) = outcome {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run_prompt(client: &GeminiClient, prompt: &str) -> Result<(), LlmGatewayError> {
    let text = client.generate_text(prompt, SamplingParams::default()).await?;
    println!("{text}");
    Ok(())
}

async fn run_analyze(client: &GeminiClient, tag: &str) -> Result<(), LlmGatewayError> {
    let mut content = String::new();
    if std::io::stdin().read_to_string(&mut content).is_err() {
        eprintln!("error: content on stdin is not valid UTF-8");
        std::process::exit(2);
    }

    let analysis = analyze_content(client, &content, ContentAnalysisKind::from_tag(tag)).await?;
    println!("analysis type: {}", analysis.analysis_type);
    println!("content: {}", analysis.content_preview);
    println!("result: {}", analysis.result);
    Ok(())
}

async fn run_chat(client: GeminiClient) -> Result<(), LlmGatewayError> {
    println!(
        "chatting with {} — /reset clears the conversation, /quit exits",
        client.model()
    );

    let mut session = ChatSession::new(client);
    let stdin = std::io::stdin();

    prompt_marker();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let message = line.trim();

        match message {
            "" => {}
            "/quit" => break,
            "/reset" => {
                session.reset();
                println!("(conversation cleared)");
            }
            _ => {
                let reply = session.send(message).await?;
                println!("assistant: {reply}");
            }
        }

        prompt_marker();
    }

    Ok(())
}

fn prompt_marker() {
    print!("you: ");
    let _ = std::io::stdout().flush();
}

fn print_usage() {
    eprintln!(
        "Usage: cargo run -p chat-cli -- [--model <name>] [--prompt <text> | --analyze <type>]\n\
         \n\
         Modes:\n\
         - default: interactive chat loop over stdin\n\
         - --prompt <text>: one-shot text generation\n\
         - --analyze <type>: analyze stdin content (sentiment|summary|keywords|general)\n\
         \n\
         Options:\n\
         - --model <name>  Override the Gemini model (default: gemini-pro)\n\
         - --help          Show this help text\n\
         \n\
         Requires GOOGLE_GEMINI_API_KEY in the environment."
    );
}
