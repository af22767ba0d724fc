use proptest::prelude::*;
use stencil::algorithms::labeling;
use stencil::transform::Transform;
use stencil::Artwork;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-2 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    // Composing parent and child matches applying them sequentially,
    // for every combination of the supported transform kinds.
    #[test]
    fn compose_matches_sequential_apply(
        tx in -100.0f32..100.0,
        ty in -100.0f32..100.0,
        sx in 0.1f32..4.0,
        sy in 0.1f32..4.0,
        deg in -360.0f32..360.0,
        px in -50.0f32..50.0,
        py in -50.0f32..50.0,
    ) {
        let parent = Transform::translate(tx, ty).then(&Transform::rotate_deg(deg));
        let child = Transform::scale(sx, sy).then(&Transform::matrix(1.0, 0.0, 0.5, 1.0, 2.0, -3.0));
        let composed = parent.then(&child);

        let (ix, iy) = child.apply(px, py);
        let (ex, ey) = parent.apply(ix, iy);
        let (cx, cy) = composed.apply(px, py);
        prop_assert!(approx(cx, ex) && approx(cy, ey), "({cx},{cy}) vs ({ex},{ey})");
    }

    // Parsing the same document twice yields identical palettes and
    // region ordering, and case variants collapse to one index.
    #[test]
    fn reparse_palette_is_stable(colors in proptest::collection::vec(0u32..8, 1..12)) {
        let swatches = ["#aa0011", "#00BB22", "teal", "RED", "rgb(1,2,3)", "#abc", "#AbC", "amber"];
        let mut body = String::new();
        for (i, c) in colors.iter().enumerate() {
            let fill = swatches[*c as usize];
            body.push_str(&format!(
                r##"<rect x="{}" y="0" width="8" height="8" fill="{fill}"/>"##,
                i * 10
            ));
        }
        let doc = format!(r##"<svg viewBox="0 0 200 20">{body}</svg>"##);

        let a = Artwork::from_svg(doc.as_bytes()).expect("parse");
        let b = Artwork::from_svg(doc.as_bytes()).expect("parse");

        prop_assert_eq!(a.palette(), b.palette());
        let regions_a: Vec<(u32, u32)> = a.regions().iter().map(|r| (r.id, r.color_id)).collect();
        let regions_b: Vec<(u32, u32)> = b.regions().iter().map(|r| (r.id, r.color_id)).collect();
        prop_assert_eq!(&regions_a, &regions_b);

        // ids are 1..N with no gaps, palette indices contiguous from 1
        let n = regions_a.len() as u32;
        prop_assert!(regions_a.iter().map(|(id, _)| *id).eq(1..=n));
        let distinct: std::collections::HashSet<String> = colors
            .iter()
            .map(|c| swatches[*c as usize].trim().to_ascii_lowercase())
            .collect();
        prop_assert_eq!(a.palette().len(), distinct.len());
        for (_, color_id) in &regions_a {
            prop_assert!(*color_id >= 1 && *color_id <= a.palette().len() as u32);
        }
    }

    // Whenever placement reports strict containment, the full text box
    // really is inside the region geometry.
    #[test]
    fn contained_placements_never_leak(
        w in 1.5f32..300.0,
        h in 1.5f32..300.0,
        zoom in 0.05f32..16.0,
        digits in 1usize..4,
    ) {
        let doc = format!(
            r##"<svg viewBox="0 0 400 400"><ellipse cx="200" cy="200" rx="{}" ry="{}" fill="red"/></svg>"##,
            w * 0.5,
            h * 0.5
        );
        let art = Artwork::from_svg(doc.as_bytes()).expect("parse");
        prop_assume!(art.regions().len() == 1);
        let region = &art.regions()[0];
        let text = "8".repeat(digits);

        if let Some(p) = labeling::place_label(region, zoom, &text) {
            prop_assert!(p.font_size > 0.0);
            if p.contained {
                let tw = p.font_size * 0.6 * digits as f32;
                let th = p.font_size;
                for (cx, cy) in [
                    (p.anchor.x - tw * 0.5, p.anchor.y - th * 0.5),
                    (p.anchor.x + tw * 0.5, p.anchor.y - th * 0.5),
                    (p.anchor.x - tw * 0.5, p.anchor.y + th * 0.5),
                    (p.anchor.x + tw * 0.5, p.anchor.y + th * 0.5),
                ] {
                    prop_assert!(region.contains(cx, cy), "corner ({cx},{cy}) escaped");
                }
            }
        } else {
            // no label only for sub-unit bounding boxes
            let (minx, miny, maxx, maxy) = region.bbox;
            prop_assert!(maxx - minx <= 1.0 || maxy - miny <= 1.0);
        }
    }
}
