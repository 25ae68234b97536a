mod common;

use adf_core::primitive::hashes;
use adf_core::{
    AdfError, DecodeEvent, Decoder, Endian, MemberDefinition, RefId, Root, TypeCatalog,
    TypeDefinition, TypeKind,
};
use pretty_assertions::assert_eq;

use common::Blob;

const HEADER: u32 = 0xA000_0001;
const U16_ARRAY: u32 = 0xA000_0002;
const U32_ARRAY: u32 = 0xA000_0003;
const U8_ARRAY: u32 = 0xA000_0004;
const ITEM: u32 = 0xA000_0005;
const ITEM_ARRAY: u32 = 0xA000_0006;
const CONTAINER: u32 = 0xA000_0007;
const STATS: u32 = 0xA000_0008;
const POINTER: u32 = 0xA000_0009;
const ENUM_ARRAY: u32 = 0xA000_000A;
const MODE: u32 = 0xA000_000B;
const HOLDER: u32 = 0xA000_000C;

fn start(type_name: &str, name: Option<&str>, ref_id: Option<u64>) -> DecodeEvent {
    DecodeEvent::StructStart {
        type_name: type_name.to_string(),
        name: name.map(str::to_string),
        ref_id: ref_id.map(RefId),
    }
}

fn member(name: &str, value: &str) -> DecodeEvent {
    DecodeEvent::Member {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn array(ref_id: u64) -> DecodeEvent {
    DecodeEvent::ArrayStart {
        ref_id: Some(RefId(ref_id)),
    }
}

fn values(text: &str) -> DecodeEvent {
    DecodeEvent::ArrayValues(text.to_string())
}

fn catalog() -> TypeCatalog {
    let header = TypeDefinition::structure(
        "Header",
        HEADER,
        24,
        vec![
            MemberDefinition::new("count", hashes::UINT32, 4, 0),
            MemberDefinition::new("items", U16_ARRAY, 16, 8),
        ],
    );
    let item = TypeDefinition::structure(
        "Item",
        ITEM,
        24,
        vec![
            MemberDefinition::new("id", hashes::UINT32, 4, 0),
            MemberDefinition::new("tags", U8_ARRAY, 16, 8),
        ],
    );
    let container = TypeDefinition::structure(
        "Container",
        CONTAINER,
        32,
        vec![
            MemberDefinition::new("items", ITEM_ARRAY, 16, 0),
            MemberDefinition::new("totals", U32_ARRAY, 16, 16),
        ],
    );
    let stats = TypeDefinition::structure(
        "Stats",
        STATS,
        24,
        vec![
            MemberDefinition::new("level", hashes::UINT16, 2, 0),
            MemberDefinition::new("delta", hashes::INT32, 4, 4),
            MemberDefinition::new("scale", hashes::FLOAT32, 4, 8),
            MemberDefinition::new("seed", hashes::UINT64, 8, 16),
        ],
    );
    let mut pointer = TypeDefinition::structure("Ptr", POINTER, 8, vec![]);
    pointer.kind = TypeKind::Pointer;
    let mut mode = TypeDefinition::structure("Mode", MODE, 4, vec![]);
    mode.kind = TypeKind::Enumeration;
    let holder = TypeDefinition::structure(
        "Holder",
        HOLDER,
        8,
        vec![MemberDefinition::new("target", POINTER, 8, 0)],
    );

    let mut catalog = TypeCatalog::new();
    catalog
        .add([
            header,
            item,
            container,
            stats,
            pointer,
            mode,
            holder,
            TypeDefinition::array("U16Array", U16_ARRAY, hashes::UINT16),
            TypeDefinition::array("U32Array", U32_ARRAY, hashes::UINT32),
            TypeDefinition::array("U8Array", U8_ARRAY, hashes::UINT8),
            TypeDefinition::array("ItemArray", ITEM_ARRAY, ITEM),
            TypeDefinition::array("ModeArray", ENUM_ARRAY, MODE),
        ])
        .unwrap();
    catalog
}

fn decode(catalog: &TypeCatalog, buffer: &[u8], roots: &[Root]) -> adf_core::Result<Vec<DecodeEvent>> {
    Decoder::new(catalog).decode_roots(buffer, Endian::Little, roots)
}

fn header_buffer() -> Vec<u8> {
    Blob::le()
        .u32(0, 42)
        .array_header(8, 32, 3)
        .u16(32, 1)
        .u16(34, 2)
        .u16(36, 3)
        .build()
}

#[test]
fn structure_without_arrays_matches_manual_decode() {
    let catalog = catalog();
    let buffer = Blob::le()
        .u16(0, 7)
        .u32(4, (-12i32) as u32)
        .u32(8, 2.5f32.to_bits())
        .u64(16, 1 << 40)
        .build();

    let events = decode(&catalog, &buffer, &[Root::new("stats", STATS, 0)]).unwrap();
    assert_eq!(
        events,
        vec![
            start("Stats", Some("stats"), Some(0)),
            member("level", "7"),
            member("delta", "-12"),
            member("scale", "2.5"),
            member("seed", "1099511627776"),
            DecodeEvent::StructEnd,
        ]
    );
    let members = events
        .iter()
        .filter(|e| matches!(e, DecodeEvent::Member { .. }))
        .count();
    assert_eq!(members, catalog.resolve(STATS).unwrap().members.len());
}

#[test]
fn root_with_primitive_array_member() {
    let catalog = catalog();
    let events = decode(&catalog, &header_buffer(), &[Root::new("root", HEADER, 0)]).unwrap();

    assert_eq!(
        events,
        vec![
            start("Header", Some("root"), Some(0)),
            member("count", "42"),
            member("items", "#1"),
            DecodeEvent::StructEnd,
            array(1),
            values("1 2 3 "),
            DecodeEvent::ArrayEnd,
        ]
    );
}

#[test]
fn arrays_drain_breadth_first() {
    let catalog = catalog();
    // Container { items: [Item; 2] @ 64, totals: [u32; 2] @ 112 }
    // Item { id, tags: [u8] }
    let buffer = Blob::le()
        .array_header(0, 64, 2)
        .array_header(16, 112, 2)
        .u32(64, 10)
        .array_header(72, 128, 2)
        .u32(88, 11)
        .array_header(96, 136, 1)
        .u32(112, 1000)
        .u32(116, 2000)
        .u8(128, 5)
        .u8(129, 6)
        .u8(136, 9)
        .build();

    let events = decode(&catalog, &buffer, &[Root::new("c", CONTAINER, 0)]).unwrap();
    assert_eq!(
        events,
        vec![
            start("Container", Some("c"), Some(0)),
            member("items", "#1"),
            member("totals", "#2"),
            DecodeEvent::StructEnd,
            // items body; its nested arrays continue the numbering
            array(1),
            start("Item", None, None),
            member("id", "10"),
            member("tags", "#3"),
            DecodeEvent::StructEnd,
            start("Item", None, None),
            member("id", "11"),
            member("tags", "#4"),
            DecodeEvent::StructEnd,
            DecodeEvent::ArrayEnd,
            array(2),
            values("1000 2000 "),
            DecodeEvent::ArrayEnd,
            array(3),
            values("5 6 "),
            DecodeEvent::ArrayEnd,
            array(4),
            values("9 "),
            DecodeEvent::ArrayEnd,
        ]
    );
}

#[test]
fn primitive_u32_array_round_trip() {
    let catalog = catalog();
    let source = [0u32, 1, 65535, 123_456_789, u32::MAX];

    let mut blob = Blob::le();
    blob.array_header(0, 16, source.len() as u64);
    for (i, v) in source.iter().enumerate() {
        blob.u32(16 + i * 4, *v);
    }

    let root = TypeDefinition::structure(
        "Wrap",
        0xB000_0001,
        16,
        vec![MemberDefinition::new("values", U32_ARRAY, 16, 0)],
    );
    let mut catalog = catalog;
    catalog.add([root]).unwrap();

    let events = decode(&catalog, &blob.build(), &[Root::new("w", 0xB000_0001, 0)]).unwrap();
    let text = events
        .iter()
        .find_map(|e| match e {
            DecodeEvent::ArrayValues(text) => Some(text.clone()),
            _ => None,
        })
        .unwrap();

    let tokens: Vec<u32> = text.split_whitespace().map(|t| t.parse().unwrap()).collect();
    assert_eq!(tokens, source);
}

#[test]
fn decoding_is_idempotent() {
    let catalog = catalog();
    let buffer = header_buffer();
    let roots = [Root::new("root", HEADER, 0)];
    assert_eq!(
        decode(&catalog, &buffer, &roots).unwrap(),
        decode(&catalog, &buffer, &roots).unwrap()
    );
}

#[test]
fn empty_arrays_have_empty_bodies() {
    let catalog = catalog();
    // data offsets point far outside the buffer; with a zero count they are never visited
    let buffer = Blob::le()
        .array_header(0, 0xFFFF_0000, 0)
        .array_header(16, 0xFFFF_0000, 0)
        .build();

    let events = decode(&catalog, &buffer, &[Root::new("c", CONTAINER, 0)]).unwrap();
    assert_eq!(
        events[4..].to_vec(),
        vec![
            array(1),
            DecodeEvent::ArrayEnd,
            array(2),
            values(""),
            DecodeEvent::ArrayEnd,
        ]
    );
}

#[test]
fn multiple_roots_share_one_numbering() {
    let catalog = catalog();
    let buffer = Blob::le()
        .u32(0, 1)
        .array_header(8, 64, 1)
        .u32(32, 2)
        .array_header(40, 66, 1)
        .u16(64, 100)
        .u16(66, 200)
        .build();

    let events = decode(
        &catalog,
        &buffer,
        &[Root::new("first", HEADER, 0), Root::new("second", HEADER, 32)],
    )
    .unwrap();

    assert_eq!(
        events,
        vec![
            start("Header", Some("first"), Some(0)),
            member("count", "1"),
            member("items", "#2"),
            DecodeEvent::StructEnd,
            start("Header", Some("second"), Some(1)),
            member("count", "2"),
            member("items", "#3"),
            DecodeEvent::StructEnd,
            array(2),
            values("100 "),
            DecodeEvent::ArrayEnd,
            array(3),
            values("200 "),
            DecodeEvent::ArrayEnd,
        ]
    );
}

#[test]
fn array_root_is_decoded_directly() {
    let catalog = catalog();
    let buffer = Blob::le().array_header(0, 16, 2).u16(16, 8).u16(18, 9).build();
    let events = decode(&catalog, &buffer, &[Root::new("list", U16_ARRAY, 0)]).unwrap();
    assert_eq!(events, vec![array(0), values("8 9 "), DecodeEvent::ArrayEnd]);
}

#[test]
fn big_endian_buffers() {
    let catalog = catalog();
    let buffer = Blob::new(true)
        .u32(0, 0x0102_0304)
        .array_header(8, 24, 2)
        .u16(24, 0x0100)
        .u16(26, 2)
        .build();
    let events = Decoder::new(&catalog)
        .decode_roots(&buffer, Endian::Big, &[Root::new("root", HEADER, 0)])
        .unwrap();
    assert_eq!(events[1], member("count", "16909060"));
    assert_eq!(events[5], values("256 2 "));
}

#[test]
fn array_data_outside_buffer_is_out_of_range() {
    let catalog = catalog();
    let buffer = Blob::le().u32(0, 1).array_header(8, 30, 3).pad_to(32).build();
    let err = decode(&catalog, &buffer, &[Root::new("root", HEADER, 0)]).unwrap_err();
    assert!(matches!(err, AdfError::OutOfRange { offset: 30, len: 6, .. }));
}

#[test]
fn absurd_element_count_fails_before_any_element_work() {
    let catalog = catalog();
    let buffer = Blob::le().array_header(0, 16, u64::MAX / 2).array_header(16, 0, 0).build();
    let err = decode(&catalog, &buffer, &[Root::new("c", CONTAINER, 0)]).unwrap_err();
    assert!(matches!(err, AdfError::OutOfRange { .. }));
}

#[test]
fn unsupported_member_and_element_kinds() {
    let mut catalog = catalog();
    let err = decode(&catalog, &[0; 8], &[Root::new("h", HOLDER, 0)]).unwrap_err();
    assert!(matches!(
        err,
        AdfError::UnsupportedMemberType {
            kind: TypeKind::Pointer,
            ..
        }
    ));

    let buffer = Blob::le().array_header(0, 16, 0).build();
    let err = decode(&catalog, &buffer, &[Root::new("m", ENUM_ARRAY, 0)]).unwrap_err();
    assert!(matches!(
        err,
        AdfError::UnsupportedElementType {
            kind: TypeKind::Enumeration,
            ..
        }
    ));

    catalog
        .add([TypeDefinition::structure(
            "Dangling",
            0xB000_0002,
            4,
            vec![MemberDefinition::new("x", 0xDEAD_BEEF, 4, 0)],
        )])
        .unwrap();
    let err = decode(&catalog, &[0; 4], &[Root::new("d", 0xB000_0002, 0)]).unwrap_err();
    assert!(matches!(err, AdfError::UnknownType(0xDEAD_BEEF)));
}

#[test]
fn truncated_member_fails_without_partial_output() {
    let catalog = catalog();
    let result = decode(&catalog, &[1, 0], &[Root::new("stats", STATS, 0)]);
    assert!(matches!(result, Err(AdfError::OutOfRange { .. })));
}

#[test]
fn self_referencing_array_runs_out_of_work() {
    const NODE: u32 = 0xB000_0003;
    const NODE_ARRAY: u32 = 0xB000_0004;

    // Node { children: [Node] } whose only element is the node itself
    let mut catalog = TypeCatalog::new();
    catalog
        .add([
            TypeDefinition::structure(
                "Node",
                NODE,
                16,
                vec![MemberDefinition::new("children", NODE_ARRAY, 16, 0)],
            ),
            TypeDefinition::array("NodeArray", NODE_ARRAY, NODE),
        ])
        .unwrap();
    let buffer = Blob::le().array_header(0, 0, 1).build();

    let err = decode(&catalog, &buffer, &[Root::new("n", NODE, 0)]).unwrap_err();
    assert!(matches!(err, AdfError::WorkBudgetExceeded(17)));
}

#[test]
fn well_formed_nesting_stays_within_budget() {
    let catalog = catalog();
    // two roots sharing the same bytes still decode
    let buffer = header_buffer();
    let events = decode(
        &catalog,
        &buffer,
        &[Root::new("a", HEADER, 0), Root::new("b", HEADER, 0)],
    )
    .unwrap();
    assert_eq!(events.iter().filter(|e| **e == DecodeEvent::ArrayEnd).count(), 2);
}
