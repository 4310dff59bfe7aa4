use super::*;

#[test]
fn every_operator_byte_decodes_to_itself() {
    for byte in 0..=34u8 {
        let op = Operator::from_u8(byte);
        assert!(op.is_some(), "byte {byte} should decode");
        assert_eq!(op.map(Operator::as_u8), Some(byte));
    }
}

#[test]
fn unknown_bytes_are_rejected() {
    assert_eq!(Operator::from_u8(35), None);
    assert_eq!(Operator::from_u8(u8::MAX), None);
}

#[test]
fn compound_assignment_strips_to_base_operator() {
    assert_eq!(Operator::PlusEq.remove_assignment(), Operator::Plus);
    assert_eq!(Operator::ShrEq.remove_assignment(), Operator::Shr);
    assert_eq!(Operator::Star.remove_assignment(), Operator::Star);
    assert_eq!(Operator::Eq.remove_assignment(), Operator::Eq);
}

#[test]
fn classification() {
    assert!(Operator::Eq.is_assignment());
    assert!(Operator::BitwiseXorEq.is_assignment());
    assert!(!Operator::EqEq.is_assignment());
    assert!(Operator::Neq.is_equality());
    assert!(Operator::LtEq.is_relational());
    assert!(Operator::LogicalXor.is_logical());
    assert!(Operator::Shl.is_bitwise());
    assert!(!Operator::Plus.is_bitwise());
}

#[test]
fn display_uses_source_symbol() {
    assert_eq!(Operator::LogicalXor.to_string(), "^^");
    assert_eq!(Operator::ShlEq.to_string(), "<<=");
}
