use std::{fmt, fs, path::Path};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// the kind of a data access in the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessKind {
    Load,
    Store,
    /// a load followed by a store to the same address
    Modify,
}

impl AccessKind {
    pub fn from_letter(letter: &str) -> Option<AccessKind> {
        match letter {
            "L" => Some(AccessKind::Load),
            "S" => Some(AccessKind::Store),
            "M" => Some(AccessKind::Modify),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            AccessKind::Load => 'L',
            AccessKind::Store => 'S',
            AccessKind::Modify => 'M',
        }
    }
}

/// one data access of the trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: AccessKind,
    pub address: u64,
    /// bytes accessed, carried along but never scored
    pub size: u64,
}

impl Instruction {
    pub fn new(kind: AccessKind, address: u64, size: u64) -> Self {
        Self {
            kind,
            address,
            size,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.kind.letter(), self.address, self.size)
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<Instruction, SimError> {
    let malformed = |reason: String| SimError::MalformedInstruction {
        line: line_number,
        reason,
    };
    let (letter, operand) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| malformed(format!("expected `<kind> <address>,<size>`, got `{line}`")))?;
    let kind = AccessKind::from_letter(letter)
        .ok_or_else(|| malformed(format!("unknown access kind `{letter}`")))?;
    let (address, size) = operand
        .trim()
        .split_once(',')
        .ok_or_else(|| malformed(format!("missing `,<size>` in `{line}`")))?;
    let address = address.trim();
    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    let address = u64::from_str_radix(hex, 16)
        .map_err(|e| malformed(format!("bad hex address `{address}`: {e}")))?;
    let size = size.trim();
    let size = size
        .parse::<u64>()
        .map_err(|e| malformed(format!("bad size `{size}`: {e}")))?;
    Ok(Instruction::new(kind, address, size))
}

/// parse a cache-lab style trace
///
/// blank lines and instruction fetches (`I ...`) are skipped.
pub fn parse_trace(text: &str) -> Result<Vec<Instruction>, SimError> {
    let mut instructions = vec![];
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('I') {
            continue;
        }
        instructions.push(parse_line(line, index + 1)?);
    }
    Ok(instructions)
}

pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<Instruction>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("cannot read trace file {}", path.display()))?;
    let instructions =
        parse_trace(&text).wrap_err_with(|| format!("cannot parse trace {}", path.display()))?;
    tracing::info!(
        instructions = instructions.len(),
        "loaded trace {}",
        path.display()
    );
    Ok(instructions)
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;
    #[test]
    fn test_parse_trace() {
        let text = "I 0400d7d4,8\n M 0421c7f0,4\n L 04f6b868,8\n S 7ff0005c8,8\n\n";
        let instructions = parse_trace(text).unwrap();
        assert_eq!(
            instructions,
            vec![
                Instruction::new(AccessKind::Modify, 0x0421c7f0, 4),
                Instruction::new(AccessKind::Load, 0x04f6b868, 8),
                Instruction::new(AccessKind::Store, 0x7ff0005c8, 8),
            ]
        );
    }

    #[test]
    fn test_hex_prefix_and_spacing() {
        let instructions = parse_trace("L 0x10,1\n\tS   0X2a , 4").unwrap();
        assert_eq!(instructions[0], Instruction::new(AccessKind::Load, 0x10, 1));
        assert_eq!(instructions[1], Instruction::new(AccessKind::Store, 0x2a, 4));
    }

    #[test]
    fn test_malformed() {
        let cases = [
            ("L 10,1\nX 10,1", 2),
            ("L zz,1", 1),
            ("L 10,one", 1),
            ("L 10", 1),
            ("L", 1),
            ("\n\nS 10,-1", 3),
            ("M 10000000000000000,1", 1),
        ];
        for (text, expected_line) in cases {
            match parse_trace(text) {
                Err(SimError::MalformedInstruction { line, .. }) => {
                    assert_eq!(line, expected_line, "{text:?}")
                }
                other => panic!("{text:?} parsed to {other:?}"),
            }
        }
    }

    #[test]
    fn test_display() {
        let instruction = Instruction::new(AccessKind::Modify, 0x7ff0005c8, 8);
        assert_eq!(instruction.to_string(), "M 7ff0005c8,8");
        // displayed instructions parse back to themselves
        assert_eq!(
            parse_trace(&instruction.to_string()).unwrap(),
            vec![instruction]
        );
    }

    #[test]
    fn test_load_trace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, " L 10,1\n M 20,1\n").unwrap();
        let instructions = load_trace(file.path()).unwrap();
        assert_eq!(instructions.len(), 2);

        assert!(load_trace("/no/such/file.trace").is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, " Q 10,1\n").unwrap();
        let err = load_trace(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SimError>(),
            Some(SimError::MalformedInstruction { line: 1, .. })
        ));
    }
}
