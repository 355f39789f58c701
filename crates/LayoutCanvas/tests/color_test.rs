use glam::Vec4;
use layout_canvas::color::{decode, encode, pack, unpack};

#[test]
fn test_round_trip_boundary_values() {
    for value in [0x00000000u32, 0xFFFFFFFF, 0x00FF00FF] {
        let token = encode(value);
        assert_eq!(
            decode(token.as_str()),
            Some(value),
            "round trip failed for {value:#010x} via {token}"
        );
    }
}

#[test]
fn test_encode_format() {
    // Leading zeros are omitted, matching the engine-facing format.
    assert_eq!(encode(0).as_str(), "#0");
    assert_eq!(encode(0xff).as_str(), "#ff");
    assert_eq!(encode(0xFFFFFFFF).as_str(), "#ffffffff");
    assert_eq!(encode(0x00FF00FF).as_str(), "#ff00ff");
}

#[test]
fn test_decode_rejects_malformed_tokens() {
    assert_eq!(decode("ffffffff"), None); // no '#'
    assert_eq!(decode("#"), None);
    assert_eq!(decode("#not-hex"), None);
    assert_eq!(decode("#fffffffff"), None); // more than 8 digits
}

#[test]
fn test_pack_unpack_channels() {
    let packed = pack(Vec4::new(1.0, 0.0, 1.0, 0.0));
    assert_eq!(packed, 0x00FF00FF);

    let color = unpack(0xFF000000);
    assert_eq!(color, Vec4::new(0.0, 0.0, 0.0, 1.0));

    // Quantize-exact colors survive a full pack/unpack cycle.
    let original = Vec4::new(1.0, 128.0 / 255.0, 0.0, 1.0);
    assert_eq!(unpack(pack(original)), original);
}
