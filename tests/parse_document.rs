use stencil::model::Color;
use stencil::Artwork;

#[test]
fn single_rect_document() {
    let doc = br##"<svg viewBox="0 0 100 100"><rect x="0" y="0" width="100" height="100" fill="#ff0000"/></svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    assert_eq!(art.width(), 100.0);
    assert_eq!(art.height(), 100.0);
    assert_eq!(art.regions().len(), 1);
    assert_eq!(art.palette(), &[Color { r: 255, g: 0, b: 0, a: 255 }]);
    let region = &art.regions()[0];
    assert_eq!(region.id, 1);
    assert_eq!(region.color_id, 1);
    assert!(!region.filled);
    assert_eq!(region.current_color, Color::WHITE);
}

#[test]
fn case_variant_hex_shares_palette_index() {
    let doc = br##"<svg viewBox="0 0 10 10">
        <path d="M 0 0 L 4 0 L 4 4 Z" fill="#00FF00"/>
        <path d="M 5 5 L 9 5 L 9 9 Z" fill="#00ff00"/>
    </svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    assert_eq!(art.palette().len(), 1);
    assert_eq!(art.regions().len(), 2);
    assert!(art.regions().iter().all(|r| r.color_id == 1));
}

#[test]
fn region_ids_are_sequential_in_traversal_order() {
    let doc = br##"<svg viewBox="0 0 100 100">
        <rect x="0" y="0" width="10" height="10" fill="red"/>
        <g>
            <rect x="20" y="0" width="10" height="10" fill="blue"/>
            <rect x="40" y="0" width="10" height="10" fill="red"/>
        </g>
        <rect x="60" y="0" width="10" height="10" fill="green"/>
    </svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    let ids: Vec<u32> = art.regions().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    // color ids follow first-seen order, independent of region count
    let colors: Vec<u32> = art.regions().iter().map(|r| r.color_id).collect();
    assert_eq!(colors, vec![1, 2, 1, 3]);
}

#[test]
fn viewbox_wins_over_width_height() {
    let doc = br##"<svg viewBox="0 0 320 240" width="64" height="48"><rect width="5" height="5" fill="red"/></svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    assert_eq!((art.width(), art.height()), (320.0, 240.0));
}

#[test]
fn width_height_suffixes_are_stripped() {
    let doc = br##"<svg width="120px" height="80pt"></svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    assert_eq!((art.width(), art.height()), (120.0, 80.0));
}

#[test]
fn missing_dimensions_default_to_500() {
    let art = Artwork::from_svg(b"<svg></svg>").expect("parse");
    assert_eq!((art.width(), art.height()), (500.0, 500.0));
}

#[test]
fn nested_transforms_compose_through_groups() {
    let doc = br##"<svg viewBox="0 0 100 100">
        <g transform="translate(10, 0)">
            <g transform="scale(2)">
                <rect x="0" y="0" width="5" height="5" fill="red"/>
            </g>
        </g>
    </svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    let (minx, miny, maxx, maxy) = art.regions()[0].bbox;
    assert!((minx - 10.0).abs() < 1e-3);
    assert!((miny - 0.0).abs() < 1e-3);
    assert!((maxx - 20.0).abs() < 1e-3);
    assert!((maxy - 10.0).abs() < 1e-3);
}

#[test]
fn shape_transform_applies_to_its_own_geometry() {
    let doc = br##"<svg viewBox="0 0 100 100">
        <rect x="0" y="0" width="10" height="10" transform="translate(30, 40)" fill="red"/>
    </svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    assert!(art.regions()[0].contains(35.0, 45.0));
    assert!(!art.regions()[0].contains(5.0, 5.0));
}

#[test]
fn transform_function_order_is_fixed_not_textual() {
    let a = Artwork::from_svg(
        br##"<svg viewBox="0 0 100 100"><rect width="10" height="10" transform="translate(20, 0) rotate(90)" fill="red"/></svg>"##,
    )
    .expect("parse");
    let b = Artwork::from_svg(
        br##"<svg viewBox="0 0 100 100"><rect width="10" height="10" transform="rotate(90) translate(20, 0)" fill="red"/></svg>"##,
    )
    .expect("parse");
    let ba = a.regions()[0].bbox;
    let bb = b.regions()[0].bbox;
    assert!((ba.0 - bb.0).abs() < 1e-3 && (ba.3 - bb.3).abs() < 1e-3);
}

#[test]
fn malformed_markup_is_fatal() {
    assert!(Artwork::from_svg(b"<svg><rect").is_err());
    assert!(Artwork::from_svg(b"not xml at all").is_err());
    assert!(Artwork::from_svg(&[0xFF, 0xFE, 0x00]).is_err());
}

#[test]
fn unrecognized_elements_are_transparent_to_traversal() {
    let doc = br##"<svg viewBox="0 0 10 10">
        <widget fill="red">
            <rect width="4" height="4" fill="blue"/>
        </widget>
    </svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    assert_eq!(art.regions().len(), 1);
    assert_eq!(art.palette(), &[Color { r: 0x21, g: 0x96, b: 0xF3, a: 255 }]);
}

#[test]
fn unfilled_and_transparent_shapes_are_skipped() {
    let doc = br##"<svg viewBox="0 0 10 10">
        <rect width="4" height="4"/>
        <rect width="4" height="4" fill="none"/>
        <rect width="4" height="4" fill=""/>
        <rect width="4" height="4" fill="red"/>
    </svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    assert_eq!(art.regions().len(), 1);
    assert_eq!(art.palette().len(), 1);
}

#[test]
fn unparsable_color_degrades_to_gray() {
    let doc = br##"<svg viewBox="0 0 10 10"><rect width="4" height="4" fill="url(#gradient)"/></svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    assert_eq!(art.regions().len(), 1);
    assert_eq!(art.palette(), &[Color { r: 0x9E, g: 0x9E, b: 0x9E, a: 255 }]);
}

#[test]
fn bad_shape_attributes_skip_only_that_node() {
    let doc = br##"<svg viewBox="0 0 10 10">
        <rect width="oops" height="4" fill="red"/>
        <circle r="-2" fill="red"/>
        <path d="" fill="red"/>
        <polygon points="1" fill="red"/>
        <rect width="4" height="4" fill="red"/>
    </svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    assert_eq!(art.regions().len(), 1);
}

#[test]
fn all_shape_kinds_produce_regions() {
    let doc = br##"<svg viewBox="0 0 100 100">
        <path d="M 0 0 L 10 0 L 10 10 Z" fill="red"/>
        <rect x="20" y="0" width="10" height="10" fill="green"/>
        <circle cx="45" cy="5" r="5" fill="blue"/>
        <ellipse cx="65" cy="5" rx="6" ry="4" fill="yellow"/>
        <polygon points="80,0 90,0 85,10" fill="purple"/>
        <polyline points="0,20 10,20 10,30 0,30" fill="pink"/>
    </svg>"##;
    let art = Artwork::from_svg(doc).expect("parse");
    assert_eq!(art.regions().len(), 6);
    assert_eq!(art.palette().len(), 6);
    // polyline is force-closed, so its interior is fillable
    let polyline = &art.regions()[5];
    assert!(polyline.contains(5.0, 25.0));
    // circle containment respects the curve, not the bbox
    let circle = &art.regions()[2];
    assert!(circle.contains(45.0, 5.0));
    assert!(!circle.contains(40.5, 0.5));
}

#[test]
fn reparse_is_deterministic() {
    let doc = br##"<svg viewBox="0 0 50 50">
        <rect width="10" height="10" fill="#ABCDEF"/>
        <rect x="20" width="10" height="10" fill="teal"/>
        <rect x="40" width="10" height="10" fill="#abcdef"/>
    </svg>"##;
    let a = Artwork::from_svg(doc).expect("parse");
    let b = Artwork::from_svg(doc).expect("parse");
    assert_eq!(a.palette(), b.palette());
    assert_eq!(a.palette().len(), 2);
    let ids_a: Vec<(u32, u32)> = a.regions().iter().map(|r| (r.id, r.color_id)).collect();
    let ids_b: Vec<(u32, u32)> = b.regions().iter().map(|r| (r.id, r.color_id)).collect();
    assert_eq!(ids_a, ids_b);
    assert_eq!(ids_a, vec![(1, 1), (2, 2), (3, 1)]);
}

#[test]
fn oversized_path_data_yields_no_region() {
    let long = "M 0 0 L 1 1 ".repeat(100_000);
    let doc = format!(r##"<svg viewBox="0 0 10 10"><path d="{long}" fill="red"/></svg>"##);
    let art = Artwork::from_svg(doc.as_bytes()).expect("parse");
    assert_eq!(art.regions().len(), 0);
    assert_eq!(art.palette().len(), 0);
}
