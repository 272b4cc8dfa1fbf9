// Path: crates/vm-mock/tests/derived_types.rs
//! Derived codec behavior for user-defined records and enums: field-order
//! concatenation, the `default_on_empty` policy, single-byte enum
//! discriminants, and typed context accessors over the mock host.

use keel_codec::{
    DecodeCursor, DecodeError, ErrorCode, NestedDecode, NestedEncode, TopDecode, TopEncode,
    TypeAbi,
};
use keel_contract_sdk::storage::{SingleValueMapper, StorageKey, StorageMapper};
use keel_contract_sdk::{Address, BigUint, ContractContext};
use keel_vm_mock::MockVm;

#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, TypeAbi, Debug, Clone, PartialEq, Eq)]
struct AuctionState {
    seller: Address,
    min_bid: BigUint,
    deadline: u64,
    settled: bool,
}

#[derive(
    TopEncode, TopDecode, NestedEncode, NestedDecode, Debug, Clone, Default, PartialEq, Eq,
)]
#[codec(default_on_empty)]
struct Tally {
    yes: u32,
    no: u32,
}

#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, TypeAbi, Debug, Clone, Copy, PartialEq, Eq)]
enum AuctionPhase {
    Open,
    Ended,
    Cancelled,
}

fn sample_state() -> AuctionState {
    AuctionState {
        seller: Address::new([3u8; 32]),
        min_bid: BigUint::from_u64(64_250),
        deadline: 1_700_000_000,
        settled: false,
    }
}

#[test]
fn struct_encodes_fields_in_declaration_order() {
    let state = sample_state();
    let top = state.top_encode().unwrap();

    // untagged: address (32) ++ len-prefixed magnitude (4 + 2) ++ u64 (8)
    // ++ bool (1)
    assert_eq!(top.len(), 32 + 4 + 2 + 8 + 1);
    assert_eq!(&top[..32], &[3u8; 32]);
    assert_eq!(&top[32..38], &[0, 0, 0, 2, 0xFA, 0xFA]);

    let decoded = AuctionState::top_decode(&top).unwrap();
    assert_eq!(decoded, state);
}

#[test]
fn struct_nested_and_top_bodies_are_identical() {
    let state = sample_state();
    let mut nested = Vec::new();
    state.dep_encode(&mut nested).unwrap();
    assert_eq!(nested, state.top_encode().unwrap());

    let mut cursor = DecodeCursor::new(&nested);
    assert_eq!(AuctionState::dep_decode(&mut cursor).unwrap(), state);
    assert!(cursor.finish().is_ok());
}

#[test]
fn struct_decode_rejects_trailing_bytes() {
    let mut top = sample_state().top_encode().unwrap();
    top.push(0xFF);
    assert_eq!(
        AuctionState::top_decode(&top),
        Err(DecodeError::InputTooLong)
    );
}

#[test]
fn default_on_empty_struct_follows_the_policy() {
    // the all-default record serializes to the empty buffer...
    assert!(Tally::default().top_encode().unwrap().is_empty());
    // ...and the empty buffer decodes to the default record without
    // touching any field decoder
    assert_eq!(Tally::top_decode(&[]).unwrap(), Tally::default());

    // a non-default record round-trips through the explicit form
    let tally = Tally { yes: 7, no: 2 };
    let top = tally.top_encode().unwrap();
    assert_eq!(top.len(), 8);
    assert_eq!(Tally::top_decode(&top).unwrap(), tally);
}

#[test]
fn plain_struct_rejects_the_empty_buffer() {
    // AuctionState did not opt into default_on_empty
    assert!(AuctionState::top_decode(&[]).is_err());
}

#[test]
fn enum_encodes_as_its_declaration_index() {
    let mut out = Vec::new();
    AuctionPhase::Ended.dep_encode(&mut out).unwrap();
    assert_eq!(out, vec![1]);

    // variant zero's top form is the empty buffer (minimal u8)
    assert!(AuctionPhase::Open.top_encode().unwrap().is_empty());
    assert_eq!(AuctionPhase::top_decode(&[]).unwrap(), AuctionPhase::Open);
    assert_eq!(
        AuctionPhase::top_decode(&[2]).unwrap(),
        AuctionPhase::Cancelled
    );
}

#[test]
fn enum_rejects_out_of_range_discriminants() {
    let err = AuctionPhase::top_decode(&[3]).unwrap_err();
    assert_eq!(
        err,
        DecodeError::InvalidEnumDiscriminant {
            discriminant: 3,
            variant_count: 3,
        }
    );
    assert_eq!(err.code(), "CODEC_INVALID_ENUM_DISCRIMINANT");

    let bytes = [9u8];
    let mut cursor = DecodeCursor::new(&bytes);
    assert!(AuctionPhase::dep_decode(&mut cursor).is_err());
}

#[test]
fn derived_type_abi_names() {
    assert_eq!(AuctionState::type_name(), "AuctionState");
    assert_eq!(AuctionPhase::type_name(), "AuctionPhase");
}

#[test]
fn derived_records_flow_through_storage_and_arguments() {
    let vm = MockVm::new();
    let ctx: ContractContext<MockVm> = ContractContext::new(vm.clone());

    // from-storage convenience path
    let slot: SingleValueMapper<MockVm, AuctionState> =
        SingleValueMapper::new(vm.clone(), StorageKey::new(b"auction"));
    let state = sample_state();
    slot.set(&state);
    assert_eq!(slot.get(), state);

    // empty slot decodes the default for opted-in records
    let tally_slot: SingleValueMapper<MockVm, Tally> =
        SingleValueMapper::new(vm.clone(), StorageKey::new(b"tally"));
    assert_eq!(tally_slot.get(), Tally::default());

    // from-argument-index convenience path
    vm.set_args(vec![
        state.top_encode().unwrap(),
        AuctionPhase::Ended.top_encode().unwrap(),
    ]);
    assert_eq!(ctx.arg::<AuctionState>(0), state);
    assert_eq!(ctx.arg::<AuctionPhase>(1), AuctionPhase::Ended);
    assert_eq!(ctx.arg_count(), 2);
}

#[test]
#[should_panic(expected = "argument decode error")]
fn typed_argument_access_traps_on_malformed_bytes() {
    let vm = MockVm::new();
    let ctx: ContractContext<MockVm> = ContractContext::new(vm.clone());
    vm.set_args(vec![vec![0xFF; 3]]);
    ctx.arg::<AuctionState>(0);
}
