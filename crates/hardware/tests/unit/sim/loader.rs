//! # Loader Tests
//!
//! Parsing of program text and memory images, and loading both from disk.

use std::collections::BTreeMap;
use std::io::Write;

use mipsim_core::common::AddressError;
use mipsim_core::isa::{Instruction, Opcode, Operand};
use mipsim_core::sim::loader::{self, LoadError};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use crate::common::builder::instruction::*;

/// Helper function to create a temporary text file for testing.
fn create_temp_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn parses_every_operand_form() {
    let program = loader::parse_program(
        "ADD R1,R2,R3\n\
         addi r4, r4, -1\n\
         BNE R4 R0 -2\n\
         LW R5,16(R6)\n\
         SW R5, -4(R6)\n\
         CACHE 1\n\
         J 0\n\
         HALT\n",
    )
    .unwrap();
    assert_eq!(
        program,
        vec![
            add(1, 2, 3),
            addi(4, 4, -1),
            bne(4, 0, -2),
            lw(5, 16, 6),
            sw(5, -4, 6),
            cache(1),
            j(0),
            halt(),
        ]
    );
}

#[test]
fn skips_blank_and_comment_lines() {
    let program = loader::parse_program("\n# setup\n   \nNOP\n  # indented comment\nHALT").unwrap();
    assert_eq!(program, vec![nop(), halt()]);
}

#[test]
fn unknown_mnemonic_survives_loading() {
    let program = loader::parse_program("MUL R1,R2,R3").unwrap();
    assert_eq!(
        program,
        vec![Instruction::new(
            Opcode::Unknown("MUL".into()),
            vec![Operand::Register(1), Operand::Register(2), Operand::Register(3)],
        )]
    );
}

#[test]
fn bad_operand_reports_line_number() {
    let err = loader::parse_program("NOP\n\nADD R1,R2,banana\n").unwrap_err();
    match err {
        LoadError::Parse { line, message } => {
            assert_eq!(line, 3);
            assert!(message.contains("banana"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn malformed_memory_operand() {
    assert!(matches!(
        loader::parse_program("LW R1,8(X2)"),
        Err(LoadError::Parse { line: 1, .. })
    ));
}

#[test]
fn memory_image_addresses_are_binary() {
    let image = loader::parse_memory_image("0,5\n100,-3\n# comment\n\n10000000, 42\n").unwrap();
    assert_eq!(image, BTreeMap::from([(0, 5), (4, -3), (128, 42)]));
}

#[test]
fn memory_image_accepts_unsigned_words() {
    let image =
        loader::parse_memory_image("0,4294967295
100,2147483648
1000,-2147483648
").unwrap();
    assert_eq!(
        image,
        BTreeMap::from([(0, -1), (4, i32::MIN), (8, i32::MIN)])
    );
}

#[test]
fn memory_image_rejects_values_wider_than_a_word() {
    for text in ["0,4294967296", "0,-2147483649"] {
        assert!(matches!(
            loader::parse_memory_image(text),
            Err(LoadError::Parse { line: 1, .. })
        ));
    }
}

#[test]
fn memory_image_later_entries_win() {
    let image = loader::parse_memory_image("1000,1\n1000,2\n").unwrap();
    assert_eq!(image, BTreeMap::from([(8, 2)]));
}

#[test]
fn memory_image_rejects_unaligned_address() {
    let err = loader::parse_memory_image("0,1\n11,2\n").unwrap_err();
    assert!(matches!(
        err,
        LoadError::Address {
            line: 2,
            source: AddressError::Misaligned { address: 3 }
        }
    ));
}

#[test]
fn memory_image_rejects_non_binary_address() {
    assert!(matches!(
        loader::parse_memory_image("12,1"),
        Err(LoadError::Parse { line: 1, .. })
    ));
}

#[test]
fn memory_image_requires_two_fields() {
    assert!(matches!(
        loader::parse_memory_image("1000"),
        Err(LoadError::Parse { line: 1, .. })
    ));
}

#[test]
fn load_program_from_file() {
    let file = create_temp_file("ADDI R1,R0,7\nHALT\n");
    let program = loader::load_program(file.path()).unwrap();
    assert_eq!(program, vec![addi(1, 0, 7), halt()]);
}

#[test]
fn load_memory_image_from_file() {
    let file = create_temp_file("1100,9\n");
    let image = loader::load_memory_image(file.path()).unwrap();
    assert_eq!(image, BTreeMap::from([(12, 9)]));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    let err = loader::load_program(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("absent.txt"));
}
