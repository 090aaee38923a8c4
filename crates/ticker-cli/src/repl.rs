//! Interactive question loop

use anyhow::Result;
use std::io::{self, BufRead, Write};
use ticker_tools::ToolRegistry;

use crate::render;

const BANNER: &str = r#"
╔══════════════════════════════════════════════════════════════╗
║                      Ticker Insight                          ║
║                                                              ║
║  Ask about a stock in plain English:                         ║
║    "Why did Tesla stock drop today?"                         ║
║    "What's happening with PLTR recently?"                    ║
║                                                              ║
║  Commands:                                                   ║
║    /tools  - list available tools                            ║
║    /help   - show this help                                  ║
║    /exit   - quit                                            ║
╚══════════════════════════════════════════════════════════════╝
"#;

/// What to do with one line of input
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Exit,
    Help,
    Tools,
    Question(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    match line.trim() {
        "" => Input::Empty,
        "/exit" | "/quit" | "exit" | "quit" => Input::Exit,
        "/help" => Input::Help,
        "/tools" => Input::Tools,
        question => Input::Question(question),
    }
}

/// Read questions from stdin until EOF or `/exit`
pub async fn run(registry: &ToolRegistry, as_json: bool) -> Result<()> {
    println!("{BANNER}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("ticker> ");
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        match classify(&line) {
            Input::Empty => {}
            Input::Exit => {
                println!("Goodbye!");
                break;
            }
            Input::Help => println!("{BANNER}"),
            Input::Tools => println!("{}\n", render::tool_list(&registry.definitions(), as_json)?),
            Input::Question(question) => match crate::ask(registry, question).await {
                Ok(response) => println!("{}\n", render::response(&response, as_json)?),
                Err(e) => eprintln!("Error: {e}\n"),
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("   \n"), Input::Empty);
        assert_eq!(classify("/exit\n"), Input::Exit);
        assert_eq!(classify("quit"), Input::Exit);
        assert_eq!(classify("/help"), Input::Help);
        assert_eq!(classify("/tools"), Input::Tools);
        assert_eq!(
            classify("  How is Netflix doing?\n"),
            Input::Question("How is Netflix doing?")
        );
    }
}
