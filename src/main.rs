//! Interactive front end: reads one numeral per line from stdin and
//! prints the decoded instruction.

use std::env;
use std::io::{BufRead, Write};
use std::num::ParseIntError;

use decoder::Case;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let thumb = args.iter().any(|arg| arg == "--thumb");
    let case = if args.iter().any(|arg| arg == "--lowercase") {
        Case::Lower
    } else {
        Case::Upper
    };
    tracing::debug!(thumb, ?case, "session started");

    if thumb {
        println!("disarm - Thumb-1 disassembler");
    } else {
        println!("disarm - ARMv4T disassembler");
    }
    println!("Enter a machine word per line (0x.., 0o.., 0b.. or bare hex); exit/quit to leave.");

    let stdin = std::io::stdin();
    prompt();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let input = line.trim();

        if input.is_empty() {
            prompt();
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        match parse_word(input) {
            Ok(value) if thumb => {
                let halfword = (value & 0xFFFF) as u16;
                println!("{halfword:04X}: {}", decoder::thumb::disassemble(halfword, case));
            }
            Ok(value) => {
                println!("{value:08X}: {}", decoder::arm::disassemble(value, case));
            }
            Err(_) => println!("Invalid format! Please try again."),
        }
        prompt();
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Parses a numeral with an optional `0x`/`0o`/`0b` radix prefix;
/// unprefixed input is read as hex.
fn parse_word(text: &str) -> Result<u32, ParseIntError> {
    let text = text.to_lowercase();
    if let Some(hex) = text.strip_prefix("0x") {
        u32::from_str_radix(hex, 16)
    } else if let Some(octal) = text.strip_prefix("0o") {
        u32::from_str_radix(octal, 8)
    } else if let Some(binary) = text.strip_prefix("0b") {
        u32::from_str_radix(binary, 2)
    } else {
        u32::from_str_radix(&text, 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn radix_prefixes() {
        assert_eq!(parse_word("0xE3A00001"), Ok(0xE3A0_0001));
        assert_eq!(parse_word("0o177"), Ok(0o177));
        assert_eq!(parse_word("0b1011"), Ok(0b1011));
    }

    #[test]
    fn bare_input_is_hex() {
        assert_eq!(parse_word("4770"), Ok(0x4770));
        assert_eq!(parse_word("e3a00001"), Ok(0xE3A0_0001));
    }

    #[test]
    fn prefixes_are_case_insensitive() {
        assert_eq!(parse_word("0XFF"), Ok(0xFF));
        assert_eq!(parse_word("0B10"), Ok(0b10));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_word("hello!").is_err());
        assert!(parse_word("0x").is_err());
        assert!(parse_word("0x1G").is_err());
    }
}
