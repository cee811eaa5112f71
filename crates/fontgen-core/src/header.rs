//! C++ header generation for OTOS font lookup tables.
//!
//! A header is written in fixed phases: license banner, autogeneration
//! warning, lookup table preamble, one table per font size and the closing
//! block. [`HeaderWriter`] renders each phase into any [`std::fmt::Write`]
//! sink; [`HeaderWriter::write_font_set`] drives the whole sequence.

use std::fmt::{self, Write};

use crate::bitmap::GlyphBitmap;
use crate::config::GeneratorInfo;
use crate::set::FontSet;

/// Indentation of every array initializer line.
pub const ARRAY_INDENT: &str = "        ";

/// Turns a font name into a valid C identifier.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, a leading digit is
/// prefixed with `_` and an empty name becomes `Font`.
pub fn c_identifier(name: &str) -> String {
    let mut ident: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() {
        ident.push_str("Font");
    } else if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Include guard macro for a font name, e.g. `FONT_ARIAL_H_`.
pub fn include_guard(name: &str) -> String {
    format!("FONT_{}_H_", c_identifier(name).to_ascii_uppercase())
}

/// Writes the sections of a font header into a text sink.
pub struct HeaderWriter<W: Write> {
    out: W,
}

impl<W: Write> HeaderWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// License banner, verbatim.
    pub fn write_banner(&mut self, info: &GeneratorInfo) -> fmt::Result {
        self.out.write_str(&info.banner)?;
        if !info.banner.is_empty() && !info.banner.ends_with('\n') {
            self.out.write_char('\n')?;
        }
        Ok(())
    }

    /// Comment naming the generator and its version.
    pub fn write_autogen_warning(&mut self, info: &GeneratorInfo) -> fmt::Result {
        write!(
            self.out,
            "\n/**\n * @attention\n * This file is autogenerated by {} - {}.\n * You should probably not edit this file manually.\n */\n",
            info.name, info.version
        )
    }

    /// Include guard, includes and the table type of the font's namespace.
    pub fn write_preamble(&mut self, name: &str) -> fmt::Result {
        let guard = include_guard(name);
        writeln!(self.out)?;
        writeln!(self.out, "#ifndef {}", guard)?;
        writeln!(self.out, "#define {}", guard)?;
        writeln!(self.out)?;
        writeln!(self.out, "// === Includes ===")?;
        writeln!(self.out, "#include <cstdint>")?;
        writeln!(self.out)?;
        writeln!(self.out, "// === Lookup tables ===")?;
        writeln!(self.out, "namespace Font {{")?;
        writeln!(self.out, "namespace {} {{", c_identifier(name))?;
        writeln!(
            self.out,
            "    /// Lookup table of the font \"{}\" at one size.",
            comment_text(name)
        )?;
        writeln!(self.out, "    struct Table {{")?;
        writeln!(self.out, "        std::uint16_t width;       ///< Glyph width in pixels")?;
        writeln!(self.out, "        std::uint16_t height;      ///< Glyph height in pixels")?;
        writeln!(self.out, "        std::uint8_t stride;       ///< Bytes per glyph column")?;
        writeln!(self.out, "        const std::uint8_t *data;  ///< 256 glyphs, column-major")?;
        writeln!(self.out, "    }};")
    }

    /// Comment and opening brace of one size's glyph array.
    pub fn write_table_begin(&mut self, name: &str, width: u32, size: u32) -> fmt::Result {
        writeln!(self.out)?;
        writeln!(self.out, "    // {}, {}x{} px", comment_text(name), width, size)?;
        writeln!(self.out, "    constexpr std::uint8_t Data_{}px[] = {{", size)
    }

    /// One glyph as an initializer line, indented by [`ARRAY_INDENT`].
    pub fn write_array_line(&mut self, code: u8, glyph: &GlyphBitmap) -> fmt::Result {
        self.out.write_str(ARRAY_INDENT)?;
        for byte in glyph.as_bytes() {
            write!(self.out, "0x{:02X}, ", byte)?;
        }
        write!(self.out, "// 0x{:02X}", code)?;
        if is_printable(code) {
            write!(self.out, " '{}'", char::from(code))?;
        }
        writeln!(self.out)
    }

    /// Closing brace, size check and the table descriptor of one size.
    pub fn write_table_end(
        &mut self,
        name: &str,
        width: u32,
        size: u32,
        stride: u32,
    ) -> fmt::Result {
        let name = c_string_escape(name);
        writeln!(self.out, "    }};")?;
        writeln!(
            self.out,
            "    static_assert(sizeof(Data_{size}px) == 256 * {width} * {stride}, \"{name} {size}px table has the wrong size\");"
        )?;
        writeln!(
            self.out,
            "    constexpr Table Size_{size}px{{{width}, {size}, {stride}, Data_{size}px}};"
        )
    }

    /// Writes every phase of a font set's header, in order.
    pub fn write_font_set(&mut self, set: &FontSet, info: &GeneratorInfo) -> fmt::Result {
        let name = set.name();
        self.write_banner(info)?;
        self.write_autogen_warning(info)?;
        self.write_preamble(name)?;
        for record in set.records() {
            self.write_table_begin(name, record.pixel_width(), record.pixel_height())?;
            for (code, glyph) in (0..=u8::MAX).zip(record.glyphs()) {
                self.write_array_line(code, glyph)?;
            }
            self.write_table_end(
                name,
                record.pixel_width(),
                record.pixel_height(),
                record.byte_stride(),
            )?;
        }
        self.write_finalize(name)
    }

    /// Closes the namespaces and the include guard.
    pub fn write_finalize(&mut self, name: &str) -> fmt::Result {
        writeln!(self.out, "}} // namespace {}", c_identifier(name))?;
        writeln!(self.out, "}} // namespace Font")?;
        writeln!(self.out)?;
        writeln!(self.out, "#endif // {}", include_guard(name))
    }
}

/// Characters safe to echo in a `//` comment. `\` would continue the line.
fn is_printable(code: u8) -> bool {
    (0x20..=0x7E).contains(&code) && code != b'\\'
}

/// Font name as comment text: control characters become spaces and a
/// trailing `\` is dropped so the comment cannot swallow the next line.
fn comment_text(name: &str) -> String {
    let text: String = name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    text.trim_end_matches('\\').to_string()
}

/// Escapes a font name for a C string literal.
///
/// Control characters use three-digit octal escapes, which never absorb the
/// character that follows.
fn c_string_escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Renders the complete header of a converted font set.
pub fn render_font_set(set: &FontSet, info: &GeneratorInfo) -> String {
    let mut writer = HeaderWriter::new(String::new());
    writer
        .write_font_set(set, info)
        .expect("writing to a String should not fail");
    writer.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut HeaderWriter<String>) -> fmt::Result,
    {
        let mut writer = HeaderWriter::new(String::new());
        f(&mut writer).unwrap();
        writer.into_inner()
    }

    #[test]
    fn test_c_identifier() {
        assert_eq!(c_identifier("Arial"), "Arial");
        assert_eq!(c_identifier("DejaVu Sans Mono"), "DejaVu_Sans_Mono");
        assert_eq!(c_identifier("Font-Bold"), "Font_Bold");
        assert_eq!(c_identifier("8bit"), "_8bit");
        assert_eq!(c_identifier("  "), "Font");
        assert_eq!(c_identifier("Café"), "Caf_");
    }

    #[test]
    fn test_include_guard() {
        assert_eq!(include_guard("Arial"), "FONT_ARIAL_H_");
        assert_eq!(include_guard("DejaVu Sans"), "FONT_DEJAVU_SANS_H_");
    }

    #[test]
    fn test_autogen_warning_names_generator() {
        let info = GeneratorInfo::new("fontgen", "1.0.0");
        let text = render(|w| w.write_autogen_warning(&info));
        assert_eq!(
            text,
            "\n/**\n * @attention\n * This file is autogenerated by fontgen - 1.0.0.\n * You should probably not edit this file manually.\n */\n"
        );
    }

    #[test]
    fn test_banner_gets_trailing_newline() {
        let info = GeneratorInfo::new("g", "1").with_banner("// banner");
        assert_eq!(render(|w| w.write_banner(&info)), "// banner\n");
    }

    #[test]
    fn test_array_line_format() {
        let glyph = GlyphBitmap::from_rows(&["#.", ".#", "..", "..", "..", "..", "..", "..", "#."]);
        let text = render(|w| w.write_array_line(b'A', &glyph));
        assert_eq!(text, "        0x01, 0x01, 0x02, 0x00, // 0x41 'A'\n");
    }

    #[test]
    fn test_array_line_hides_unprintable_and_backslash() {
        let glyph = GlyphBitmap::new(1, 8);
        assert_eq!(render(|w| w.write_array_line(0, &glyph)), "        0x00, // 0x00\n");
        assert_eq!(
            render(|w| w.write_array_line(b'\\', &glyph)),
            "        0x00, // 0x5C\n"
        );
        assert_eq!(
            render(|w| w.write_array_line(0xE9, &glyph)),
            "        0x00, // 0xE9\n"
        );
        assert_eq!(
            render(|w| w.write_array_line(b' ', &glyph)),
            "        0x00, // 0x20 ' '\n"
        );
    }

    #[test]
    fn test_table_begin_and_end() {
        let begin = render(|w| w.write_table_begin("Arial", 7, 12));
        assert_eq!(
            begin,
            "\n    // Arial, 7x12 px\n    constexpr std::uint8_t Data_12px[] = {\n"
        );

        let end = render(|w| w.write_table_end("Arial", 7, 12, 2));
        assert_eq!(
            end,
            "    };\n    static_assert(sizeof(Data_12px) == 256 * 7 * 2, \"Arial 12px table has the wrong size\");\n    constexpr Table Size_12px{7, 12, 2, Data_12px};\n"
        );
    }

    #[test]
    fn test_quotes_and_backslashes_are_escaped_in_string_literal() {
        let end = render(|w| w.write_table_end("Mono \"Pro\" \\", 5, 8, 1));
        assert!(end.contains(
            "\"Mono \\\"Pro\\\" \\\\ 8px table has the wrong size\");"
        ));
    }

    #[test]
    fn test_control_characters_are_escaped() {
        assert_eq!(c_string_escape("a\nb\u{1}7"), "a\\012b\\0017");
        assert_eq!(c_string_escape("Café"), "Café");
    }

    #[test]
    fn test_comments_stay_on_one_line() {
        let begin = render(|w| w.write_table_begin("Mono\nPro \\", 5, 8));
        assert_eq!(
            begin,
            "\n    // Mono Pro , 5x8 px\n    constexpr std::uint8_t Data_8px[] = {\n"
        );

        let preamble = render(|w| w.write_preamble("Mono \"Pro\"\n"));
        assert!(preamble.contains("/// Lookup table of the font \"Mono \"Pro\" \" at one size.\n"));
    }

    #[test]
    fn test_preamble_and_finalize_match() {
        let preamble = render(|w| w.write_preamble("DejaVu Sans"));
        assert!(preamble.contains("#ifndef FONT_DEJAVU_SANS_H_\n#define FONT_DEJAVU_SANS_H_\n"));
        assert!(preamble.contains("namespace Font {\nnamespace DejaVu_Sans {\n"));
        assert!(preamble.contains("struct Table {"));

        let finalize = render(|w| w.write_finalize("DejaVu Sans"));
        assert_eq!(
            finalize,
            "} // namespace DejaVu_Sans\n} // namespace Font\n\n#endif // FONT_DEJAVU_SANS_H_\n"
        );
    }
}
