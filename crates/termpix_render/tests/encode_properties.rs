//! Property tests for output shape, purity, and escape coalescing.

use proptest::prelude::*;
use termpix_render::*;

#[derive(Clone, Debug)]
struct Case {
    viewport: Viewport,
    image: ImageSize,
    colors: Vec<u8>,
    luma: Vec<u8>,
}

/// Image fits the viewport in glyph mode; `row_scale` 2 allows half-block heights.
fn case(row_scale: u16) -> impl Strategy<Value = Case> {
    (1u16..24, 1u16..12)
        .prop_flat_map(move |(columns, rows)| {
            (Just(columns), Just(rows), 1..=columns, 1..=rows * row_scale + row_scale - 1)
        })
        .prop_flat_map(|(vc, vr, ic, ir)| {
            let cells = usize::from(ic) * usize::from(ir);
            (
                Just(Viewport::new(vc, vr)),
                Just(ImageSize::new(ic, ir)),
                prop::collection::vec(0u8..240, cells),
                prop::collection::vec(any::<u8>(), cells),
            )
        })
        .prop_map(|(viewport, image, colors, luma)| Case { viewport, image, colors, luma })
}

fn glyph_frame(case: &Case, ramp: &GlyphRamp) -> TermFrame {
    let ImageSize { columns, rows } = case.image;
    let colors = PaletteGrid::new(columns, rows, case.colors.clone()).unwrap();
    let luma = LumaGrid::new(columns, rows, case.luma.clone()).unwrap();
    encode_glyphs(&colors, &luma, ColorCode(16), ramp, case.viewport, case.image).unwrap()
}

fn half_block_frame(case: &Case) -> TermFrame {
    let ImageSize { columns, rows } = case.image;
    let colors = PaletteGrid::new(columns, rows, case.colors.clone()).unwrap();
    encode_half_blocks(&colors, ColorCode(16), case.viewport, case.image).unwrap()
}

fn runs(values: &[u8]) -> usize {
    if values.is_empty() {
        return 0;
    }
    1 + values.windows(2).filter(|pair| pair[0] != pair[1]).count()
}

fn ramp_strategy() -> impl Strategy<Value = GlyphRamp> {
    "[a-z#@.]{1,12}".prop_map(|chars| GlyphRamp::new(chars).unwrap())
}

proptest! {
    #[test]
    fn glyph_output_fills_viewport(case in case(1), ramp in ramp_strategy()) {
        let frame = glyph_frame(&case, &ramp);
        prop_assert_eq!(frame.len(), usize::from(case.viewport.rows));
        for line in frame.lines() {
            prop_assert_eq!(visible_width(line), usize::from(case.viewport.columns));
            prop_assert!(line.ends_with(RESET));
        }
    }

    #[test]
    fn half_block_output_fills_viewport(case in case(2)) {
        let frame = half_block_frame(&case);
        prop_assert_eq!(frame.len(), usize::from(case.viewport.rows));
        for line in frame.lines() {
            prop_assert_eq!(visible_width(line), usize::from(case.viewport.columns));
            prop_assert!(line.ends_with(RESET));
        }
        let blocks = frame.to_string().matches(HALF_BLOCK).count();
        prop_assert_eq!(
            blocks,
            usize::from(case.image.columns) * usize::from(case.image.rows / 2)
        );
    }

    #[test]
    fn encoding_is_pure(case in case(1), ramp in ramp_strategy()) {
        prop_assert_eq!(glyph_frame(&case, &ramp), glyph_frame(&case, &ramp));
        prop_assert_eq!(half_block_frame(&case), half_block_frame(&case));
    }

    #[test]
    fn fg_escapes_match_color_runs(case in case(1), ramp in ramp_strategy()) {
        let frame = glyph_frame(&case, &ramp);
        let ImageSize { columns, rows } = case.image;
        let padding = Padding::centered(case.viewport, columns, rows).unwrap();
        let width = usize::from(columns);

        for (y, pixels) in case.colors.chunks(width).enumerate() {
            let line = &frame.lines()[usize::from(padding.top) + y];
            prop_assert_eq!(line.matches("\x1b[38;5;").count(), runs(pixels));
        }
    }
}
