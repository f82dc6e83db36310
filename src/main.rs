use std::io::{self, BufRead, Write};

use clap::Parser as ClapParser;

use pratt_lang::{evaluate, Lexer, Parser};

const PROMPT: &str = ">> ";

/// Interactive interpreter for a small expression language.
#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the tokens of each input instead of evaluating it.
    #[arg(short, long)]
    tokens: bool,

    /// Print the parsed program before evaluating it.
    #[arg(short, long)]
    ast: bool,

    /// Evaluate this source once and exit instead of starting the REPL.
    source: Option<String>,
}

fn execute(source: &str, args: &Args) -> bool {
    if args.tokens {
        for token in Lexer::from_str(source) {
            println!("{:?} {:?}", token.kind, token.literal);
        }
        return true;
    }

    let mut parser = Parser::from_str(source);
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        for error in parser.errors() {
            eprintln!("{}", error.render(source));
        }
        return false;
    }

    if args.ast {
        println!("{}", program);
    }

    let result = evaluate(&program);
    println!("{}", result);

    !result.is_error()
}

fn is_quit_command(line: &str) -> bool {
    matches!(line.trim(), "exit" | "exit()" | "close()")
}

fn repl(args: &Args) -> io::Result<()> {
    println!("Welcome! Type an expression and press enter, `exit()` to quit.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if is_quit_command(&line) {
            break;
        }

        execute(&line, args);
    }

    println!("Bye!");
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    match &args.source {
        Some(source) => {
            if !execute(source, &args) {
                std::process::exit(1);
            }
            Ok(())
        }
        None => repl(&args),
    }
}
