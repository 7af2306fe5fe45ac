//! Startup banner. "POLICY" in figlet ASCII with a flag-colored gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Old Glory Red (#b22234).
const FLAG_RED: (u8, u8, u8) = (0xb2, 0x22, 0x34);
/// Old Glory Blue (#3c3b6e), lifted for dark terminals.
const FLAG_BLUE: (u8, u8, u8) = (0x5a, 0x6c, 0xd8);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let mix = |x: u8, y: u8| (f64::from(x) * (1.0 - t) + f64::from(y) * t).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Figlet rendering of the title, or the plain word if the font is unavailable.
fn title_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("POLICY").map(|f| f.to_string()))
        .unwrap_or_else(|| "POLICY\n".to_string())
}

/// Prints the banner with a red-to-blue gradient, then version and data sources.
pub fn print_welcome() {
    let mut out = stdout();
    let art = title_art();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(FLAG_RED, FLAG_BLUE, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: FLAG_BLUE.0,
        g: FLAG_BLUE.1,
        b: FLAG_BLUE.2,
    }));
    let _ = out.execute(Print(format!("Policy Tracker v{}\r\n", version)));
    let _ = out.execute(Print(
        "Congress.gov · Federal Register · CourtListener\r\n",
    ));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
