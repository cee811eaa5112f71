//! Rasterization tests against a real TrueType font.
//!
//! Uses DejaVu Sans Mono (Bitstream Vera license, see
//! `fixtures/DejaVuSansMono.LICENSE`).

use fontdue::{Font, FontSettings};
use fontgen_core::{
    c_identifier, FontSet, FontdueConverter, GeneratorInfo, GlyphBitmap, GlyphConverter,
};
use pretty_assertions::assert_eq;
use std::fs;

const FONT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSansMono.ttf");

fn converter(size: u32) -> FontdueConverter {
    FontdueConverter::open(FONT_PATH, size).unwrap()
}

/// The fixture parsed the same way the converter parses it.
fn raw_font(size: u32) -> Font {
    let settings = FontSettings {
        scale: size as f32,
        ..FontSettings::default()
    };
    Font::from_bytes(fs::read(FONT_PATH).unwrap(), settings).unwrap()
}

/// Lowest row holding a set pixel.
fn bottom_row(glyph: &GlyphBitmap) -> Option<u32> {
    (0..glyph.height())
        .rev()
        .find(|&y| (0..glyph.width()).any(|x| glyph.get(x, y)))
}

#[test]
fn test_embedded_name_wins_over_fallback() {
    let bytes = fs::read(FONT_PATH).unwrap();
    let converter = FontdueConverter::from_bytes(&bytes, 12, "fallback").unwrap();
    assert!(
        converter.font_name().starts_with("DejaVu Sans Mono"),
        "name: {}",
        converter.font_name()
    );
}

#[test]
fn test_with_name_replaces_font_name() {
    let converter = converter(12).with_name("Mono");
    assert_eq!(converter.font_name(), "Mono");
    assert_eq!(converter.requested_size(), 12);
}

#[test]
fn test_every_glyph_fills_the_cell() {
    for size in [8, 12, 16] {
        let converter = converter(size);
        assert_eq!(converter.pixel_height(), size);
        assert!(converter.pixel_width() >= 1 && converter.pixel_width() <= size);

        for code in 0..=u8::MAX {
            let glyph = converter.convert_character(code).unwrap();
            assert_eq!(
                (glyph.width(), glyph.height()),
                (converter.pixel_width(), size),
                "size {size}, code 0x{code:02X}"
            );
        }
    }
}

#[test]
fn test_cell_width_is_the_rounded_up_advance() {
    let converter = converter(12);
    let advance = raw_font(12).metrics('M', converter.scale()).advance_width;
    assert_eq!(converter.pixel_width(), advance.ceil() as u32);
}

#[test]
fn test_blank_and_inked_codes() {
    let converter = converter(12);
    assert_eq!(converter.convert_character(0).unwrap().ink(), 0);
    assert_eq!(converter.convert_character(b' ').unwrap().ink(), 0);
    assert!(converter.convert_character(b'A').unwrap().ink() > 0);
}

#[test]
fn test_codes_map_to_latin1() {
    let converter = converter(16);
    let e = converter.convert_character(b'e').unwrap();
    let e_acute = converter.convert_character(0xE9).unwrap();
    assert!(e_acute.ink() > 0);
    assert_ne!(e, e_acute);
    assert!(e_acute.ink() > e.ink());
}

#[test]
fn test_ink_matches_thresholded_coverage() {
    let converter = converter(12);
    let font = raw_font(12);

    for c in ['A', 'B', 'H', '0'] {
        let (_, coverage) = font.rasterize(c, converter.scale());
        let expected = coverage.iter().filter(|&&sample| sample >= 128).count() as u32;
        let glyph = converter.convert_character(c as u8).unwrap();
        assert_eq!(glyph.ink(), expected, "glyph '{c}'");
    }
}

#[test]
fn test_descenders_hang_below_the_baseline() {
    let converter = converter(16);
    let baseline = converter.baseline();
    assert!(baseline > 0 && baseline < 16, "baseline {baseline}");

    let a = bottom_row(&converter.convert_character(b'A').unwrap()).unwrap();
    let g = bottom_row(&converter.convert_character(b'g').unwrap()).unwrap();
    assert!(a <= baseline as u32, "'A' ends at row {a}, baseline {baseline}");
    assert!(g > a, "'g' ends at row {g}, 'A' at row {a}");
}

#[test]
fn test_open_convert_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let mut set = FontSet::open(FONT_PATH, &[8, 12, 16]).unwrap();
    set.convert().unwrap();

    let summary = set.export(dir.path(), &GeneratorInfo::default()).unwrap();
    assert_eq!(
        summary.path,
        dir.path().join(format!("{}.h", c_identifier(set.name())))
    );
    assert_eq!(
        summary.tables.iter().map(|&(_, h)| h).collect::<Vec<_>>(),
        vec![8, 12, 16]
    );

    let header = fs::read_to_string(&summary.path).unwrap();
    for size in [8, 12, 16] {
        let open = format!("constexpr std::uint8_t Data_{}px[] = {{", size);
        let lines = header
            .lines()
            .skip_while(|l| !l.contains(&open))
            .skip(1)
            .take_while(|l| l.trim() != "};")
            .count();
        assert_eq!(lines, 256, "size {size}");
    }
    assert!(header.contains("// 0x41 'A'"));
}
