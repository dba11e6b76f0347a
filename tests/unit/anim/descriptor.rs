use super::*;
use crate::assets::decode::image_from_rgba8;

fn sheet(width: u32, height: u32) -> SpriteSheet {
    let rgba = vec![0u8; (width * height * 4) as usize];
    SpriteSheet::new(image_from_rgba8(Dims::new(width, height).unwrap(), rgba).unwrap())
}

#[test]
fn no_animation_block_is_not_an_error() {
    assert_eq!(parse_descriptor(br#"{}"#).unwrap(), None);
    assert_eq!(
        parse_descriptor(br#"{"pack": {"description": "x"}}"#).unwrap(),
        None
    );
}

#[test]
fn malformed_json_is_a_metadata_error() {
    let err = parse_descriptor(b"{not json").unwrap_err();
    assert!(err.to_string().contains("metadata error:"));
    // The lenient playback-path variant degrades instead.
    assert!(descriptor_or_static(b"{not json").is_none());
}

#[test]
fn bare_indices_use_default_frametime() {
    let d = parse_descriptor(br#"{"animation": {"frametime": 4, "frames": [0, 2, 1]}}"#)
        .unwrap()
        .unwrap();
    assert_eq!(
        d.explicit_frames,
        vec![
            FrameSpec { sprite_index: 0, duration_ticks: 4 },
            FrameSpec { sprite_index: 2, duration_ticks: 4 },
            FrameSpec { sprite_index: 1, duration_ticks: 4 },
        ]
    );
}

#[test]
fn timed_entries_override_default() {
    let d = parse_descriptor(
        br#"{"animation": {"frames": [{"index": 0, "time": 2}, 1, {"index": 3}]}}"#,
    )
    .unwrap()
    .unwrap();
    assert_eq!(
        d.explicit_frames,
        vec![
            FrameSpec { sprite_index: 0, duration_ticks: 2 },
            FrameSpec { sprite_index: 1, duration_ticks: 1 },
            FrameSpec { sprite_index: 3, duration_ticks: 1 },
        ]
    );
}

#[test]
fn zero_frametime_is_rejected() {
    assert!(parse_descriptor(br#"{"animation": {"frametime": 0}}"#).is_err());
    assert!(
        parse_descriptor(br#"{"animation": {"frames": [{"index": 0, "time": 0}]}}"#).is_err()
    );
}

#[test]
fn interpolate_defaults_to_false() {
    let d = parse_descriptor(br#"{"animation": {}}"#).unwrap().unwrap();
    assert!(!d.interpolate);
    let d = parse_descriptor(br#"{"animation": {"interpolate": true}}"#)
        .unwrap()
        .unwrap();
    assert!(d.interpolate);
}

#[test]
fn resolve_defaults_to_square_frames() {
    let d = parse_descriptor(br#"{"animation": {}}"#).unwrap().unwrap();
    let resolved = d.resolve(&sheet(16, 64)).unwrap();
    assert_eq!(resolved.frame_dims, Dims::new(16, 16).unwrap());
    assert_eq!(resolved.sheet_frame_count, 4);
    // Absent frames list implies sequential playback over the whole sheet.
    assert_eq!(
        resolved.frames,
        (0..4)
            .map(|i| FrameSpec { sprite_index: i, duration_ticks: 1 })
            .collect::<Vec<_>>()
    );
    assert!(resolved.is_animated());
}

#[test]
fn resolve_honors_size_hints() {
    let d = parse_descriptor(br#"{"animation": {"width": 16, "height": 8}}"#)
        .unwrap()
        .unwrap();
    let resolved = d.resolve(&sheet(32, 24)).unwrap();
    assert_eq!(resolved.frame_dims, Dims::new(16, 8).unwrap());
    assert_eq!(resolved.sheet_frame_count, 3);
}

#[test]
fn resolve_rejects_inexact_sheet_division() {
    let d = parse_descriptor(br#"{"animation": {}}"#).unwrap().unwrap();
    assert!(d.resolve(&sheet(16, 40)).is_err());
}

#[test]
fn resolve_rejects_out_of_range_indices() {
    let d = parse_descriptor(br#"{"animation": {"frames": [0, 7]}}"#)
        .unwrap()
        .unwrap();
    assert!(d.resolve(&sheet(16, 32)).is_err());
}

#[test]
fn single_frame_sheet_is_not_animated() {
    let d = parse_descriptor(br#"{"animation": {}}"#).unwrap().unwrap();
    let resolved = d.resolve(&sheet(16, 16)).unwrap();
    assert!(!resolved.is_animated());
}

#[test]
fn next_sprite_index_wraps_over_the_frame_list() {
    let d = parse_descriptor(br#"{"animation": {"frames": [0, 2, 1]}}"#)
        .unwrap()
        .unwrap();
    let resolved = d.resolve(&sheet(16, 48)).unwrap();
    assert_eq!(resolved.next_sprite_index(0), 2);
    assert_eq!(resolved.next_sprite_index(1), 1);
    assert_eq!(resolved.next_sprite_index(2), 0);
}
