//! Interactive command line parsing

use alloy_primitives::Address;

/// Row number (1-based, as displayed) or a full token address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Row(usize),
    Address(Address),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    RefreshList,
    RefreshOne(Target),
    Decimals(Target),
    Connect,
    Stats,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Err("empty command".to_string());
    };
    let argument = parts.next();
    if parts.next().is_some() {
        return Err(format!("too many arguments for '{}'", name));
    }

    let lower = name.to_ascii_lowercase();
    let command = match (lower.as_str(), argument) {
        ("r" | "refresh", None) => Command::RefreshList,
        ("u" | "update", Some(arg)) => Command::RefreshOne(parse_target(arg)?),
        ("d" | "decimals", Some(arg)) => Command::Decimals(parse_target(arg)?),
        ("c" | "connect", None) => Command::Connect,
        ("s" | "stats", None) => Command::Stats,
        ("h" | "help" | "?", None) => Command::Help,
        ("q" | "quit" | "exit", None) => Command::Quit,
        ("u" | "update" | "d" | "decimals", None) => {
            return Err(format!("'{}' needs a row number or token address", name));
        }
        (_, Some(_)) if matches!(lower.as_str(), "r" | "c" | "s" | "h" | "q") => {
            return Err(format!("'{}' takes no arguments", name));
        }
        _ => return Err(format!("unknown command '{}' (h for help)", name)),
    };

    Ok(command)
}

fn parse_target(arg: &str) -> Result<Target, String> {
    if arg.starts_with("0x") || arg.starts_with("0X") {
        return arg
            .parse::<Address>()
            .map(Target::Address)
            .map_err(|e| format!("invalid address '{}': {}", arg, e));
    }

    match arg.parse::<usize>() {
        Ok(0) => Err("rows are numbered from 1".to_string()),
        Ok(row) => Ok(Target::Row(row)),
        Err(_) => Err(format!("'{}' is neither a row number nor an address", arg)),
    }
}

pub const HELP: &str = "\
Commands:
  r                 refresh the token list and every price
  u <row|address>   refresh one token's price
  d <row|address>   show the feed decimals of a token
  c                 connect (query the active network)
  s                 RPC statistics
  h                 this help
  q                 quit";

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command("r"), Ok(Command::RefreshList));
        assert_eq!(parse_command("  C "), Ok(Command::Connect));
        assert_eq!(parse_command("s"), Ok(Command::Stats));
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
    }

    #[test]
    fn test_targets() {
        assert_eq!(parse_command("u 3"), Ok(Command::RefreshOne(Target::Row(3))));
        assert_eq!(
            parse_command("d 0x1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6"),
            Ok(Command::Decimals(Target::Address(address!(
                "1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6"
            ))))
        );
    }

    #[test]
    fn test_rejected_input() {
        assert!(parse_command("").is_err());
        assert!(parse_command("u").is_err());
        assert!(parse_command("u 0").is_err());
        assert!(parse_command("u abc").is_err());
        assert!(parse_command("u 0x12").is_err());
        assert!(parse_command("r now").is_err());
        assert!(parse_command("u 1 2").is_err());
        assert!(parse_command("x").is_err());
    }
}
