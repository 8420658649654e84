//! lexkit CLI - tokenize text or files from the command line.

use std::env;
use std::fs;
use std::process;

use lexkit::{Context, Lexeme, Tokenizer};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Default)]
struct Options {
    text: Option<String>,
    file: Option<String>,
    symbols: Vec<String>,
    keywords: Vec<String>,
    filter_comments: bool,
    lexeme: Lexeme,
    context: Context,
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let mut opts = Options::default();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "-v" | "--version" => {
                println!("lexkit {}", VERSION);
                return Ok(());
            }
            "-e" | "--eval" => {
                i += 1;
                if i >= args.len() {
                    return Err("-e requires an argument".to_string());
                }
                opts.text = Some(args[i].clone());
            }
            "-s" | "--symbols" => {
                i += 1;
                if i >= args.len() {
                    return Err("-s requires a comma-separated list".to_string());
                }
                opts.symbols = split_list(&args[i]);
            }
            "-k" | "--keywords" => {
                i += 1;
                if i >= args.len() {
                    return Err("-k requires a comma-separated list".to_string());
                }
                opts.keywords = split_list(&args[i]);
            }
            "-f" | "--filter-comments" => {
                opts.filter_comments = true;
            }
            "--char" => {
                opts.lexeme = Lexeme::Char;
            }
            "--context" => {
                i += 1;
                if i >= args.len() {
                    return Err("--context requires an argument".to_string());
                }
                opts.context = parse_context(&args[i])?;
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                opts.file = Some(arg.clone());
            }
        }
        i += 1;
    }

    if let Some(text) = opts.text.take() {
        print_tokens(&text, &opts);
    } else if let Some(path) = opts.file.take() {
        let content = fs::read_to_string(&path).map_err(|e| format!("{}: {}", path, e))?;
        print_tokens(&content, &opts);
    } else {
        repl(&opts)?;
    }

    Ok(())
}

fn split_list(arg: &str) -> Vec<String> {
    arg.split(',')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_context(arg: &str) -> Result<Context, String> {
    match arg {
        "binary" => Ok(Context::Binary),
        "decimal" => Ok(Context::Decimal),
        "octal" => Ok(Context::Octal),
        "hexadecimal" => Ok(Context::Hexadecimal),
        "none" => Ok(Context::None),
        other => Err(format!("Unknown numeric context: {}", other)),
    }
}

fn print_tokens(source: &str, opts: &Options) {
    let tokens = Tokenizer::builder(source)
        .symbols(opts.symbols.iter().cloned())
        .keywords(opts.keywords.iter().cloned())
        .filter_comments(opts.filter_comments)
        .lexeme(opts.lexeme)
        .context(opts.context)
        .build()
        .tokenize();

    for token in tokens {
        let (start, _) = token.span.line_column(source);
        println!("{} ({}:{})", token, start.line, start.column);
    }
}

fn repl(opts: &Options) -> Result<(), String> {
    let mut editor = DefaultEditor::new().map_err(|e| e.to_string())?;
    println!("lexkit {} - enter text to tokenize, Ctrl-D to exit", VERSION);

    loop {
        match editor.readline(">> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                print_tokens(&line, opts);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(())
}

fn print_usage() {
    println!(
        r#"
lexkit {} - configurable maximal-munch tokenizer

Usage:
  lexkit [options] [file]

Options:
  -h, --help             Show this help message
  -v, --version          Show version
  -e, --eval <text>      Tokenize text given on the command line
  -s, --symbols <a,b,c>  Comma-separated multi-character symbols
  -k, --keywords <a,b,c> Comma-separated reserved keywords
  -f, --filter-comments  Strip comment tokens from the output
      --char             Lex bare letters as single-character tokens
      --context <mode>   Numeric context: binary, decimal, octal, hexadecimal

Examples:
  lexkit                                  Start interactive prompt
  lexkit grammar.bnf -s "<,>,::=,|"       Tokenize a file
  lexkit -e "5 + 23 * 3" -s "+,*"         Tokenize command-line text
  lexkit -e 1F --context hexadecimal      Parse digits as hexadecimal
"#,
        VERSION
    );
}
