//! Byte address helper tests.

use mipsim_core::common::{AddressError, ByteAddr};
use rstest::rstest;

#[rstest]
#[case(0, true)]
#[case(4, true)]
#[case(3, false)]
#[case(6, false)]
#[case(0x1000, true)]
fn word_alignment(#[case] addr: u32, #[case] aligned: bool) {
    assert_eq!(ByteAddr::new(addr).is_word_aligned(), aligned);
}

#[test]
fn word_index_and_back() {
    let addr = ByteAddr::new(0x48D0);
    assert_eq!(addr.word_index(), 0x1234);
    assert_eq!(ByteAddr::from_word_index(0x1234), addr);
}

#[rstest]
#[case(100, 8, 108)]
#[case(100, -100, 0)]
#[case(0, 32767, 32767)]
#[case(i32::MAX, 4, 0x8000_0003)]
fn effective_address(#[case] base: i32, #[case] offset: i32, #[case] expected: u32) {
    assert_eq!(ByteAddr::effective(base, offset), Ok(ByteAddr::new(expected)));
}

#[test]
fn negative_effective_address_is_rejected() {
    assert_eq!(
        ByteAddr::effective(4, -8),
        Err(AddressError::Negative { address: -4 })
    );
}

#[test]
fn display_is_hex() {
    assert_eq!(ByteAddr::new(255).to_string(), "0xff");
}
