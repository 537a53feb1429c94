//! Canonical text form of instructions.

use mipsim_core::isa::Instruction;
use mipsim_core::isa::disasm::disassemble;
use mipsim_core::sim::loader::parse_program;
use rstest::rstest;

use crate::common::builder::instruction::*;

#[rstest]
#[case(add(1, 2, 3), "ADD R1,R2,R3")]
#[case(addi(1, 0, -5), "ADDI R1,R0,-5")]
#[case(bne(4, 5, 2), "BNE R4,R5,2")]
#[case(jal(10), "JAL 10")]
#[case(lw(1, 8, 2), "LW R1,8(R2)")]
#[case(sw(7, -4, 29), "SW R7,-4(R29)")]
#[case(cache(2), "CACHE 2")]
#[case(halt(), "HALT")]
#[case(unknown("mul"), "mul")]
fn renders(#[case] inst: Instruction, #[case] text: &str) {
    assert_eq!(disassemble(&inst), text);
    assert_eq!(inst.to_string(), text);
}

/// The rendered text is accepted by the loader and yields the same record.
#[test]
fn text_form_reloads() {
    let program = vec![
        add(1, 2, 3),
        subi(4, 4, 1),
        bne(4, 0, -2),
        lw(1, 12, 3),
        sw(1, 0, 0),
        cache(1),
        j(0),
        nop(),
        halt(),
    ];
    let text: String = program.iter().map(|i| format!("{i}\n")).collect();
    assert_eq!(parse_program(&text).unwrap(), program);
}
