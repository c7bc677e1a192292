//! Decorators wrap a rendered line in terminal color sequences

use super::color::{Color, ColorSpec};

/// A pure string transform applied by a destination after generation.
pub trait Decorator: Send + Sync {
    fn decorate(&self, line: &str, spec: &ColorSpec) -> String;
}

/// 24-bit ANSI SGR sequences.
///
/// An absent foreground emits `ESC[39m` and an absent background `ESC[49m`,
/// so a line never inherits the previous line's channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiDecorator;

impl AnsiDecorator {
    const RESET: &'static str = "\x1b[0m";
    const RESET_FG: &'static str = "\x1b[39m";
    const RESET_BG: &'static str = "\x1b[49m";

    pub fn new() -> Self {
        Self
    }

    fn sequence(color: Color, code: u8) -> String {
        let (r, g, b) = color.to_rgb8();
        format!("\x1b[{};2;{};{};{}m", code, r, g, b)
    }
}

impl Decorator for AnsiDecorator {
    fn decorate(&self, line: &str, spec: &ColorSpec) -> String {
        let fg = spec
            .fg
            .map_or_else(|| Self::RESET_FG.to_string(), |c| Self::sequence(c, 38));
        let bg = spec
            .bg
            .map_or_else(|| Self::RESET_BG.to_string(), |c| Self::sequence(c, 48));
        format!("{}{}{}{}", fg, bg, line, Self::RESET)
    }
}

/// Decorator backed by the `colored` crate.
///
/// Unlike [`AnsiDecorator`] it honors `NO_COLOR`/`CLICOLOR` and tty
/// detection, so it may return the line unchanged. When it does color, an
/// absent channel is reset the same way [`AnsiDecorator`] resets it.
#[cfg(feature = "console")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ColoredDecorator;

#[cfg(feature = "console")]
impl Decorator for ColoredDecorator {
    fn decorate(&self, line: &str, spec: &ColorSpec) -> String {
        use colored::Colorize;

        if !colored::control::SHOULD_COLORIZE.should_colorize() {
            return line.to_string();
        }

        let mut resets = String::new();
        if spec.fg.is_none() {
            resets.push_str(AnsiDecorator::RESET_FG);
        }
        if spec.bg.is_none() {
            resets.push_str(AnsiDecorator::RESET_BG);
        }

        let mut styled = line.normal();
        if let Some(fg) = spec.fg {
            let (r, g, b) = fg.to_rgb8();
            styled = styled.truecolor(r, g, b);
        }
        if let Some(bg) = spec.bg {
            let (r, g, b) = bg.to_rgb8();
            styled = styled.on_truecolor(r, g, b);
        }
        format!("{}{}", resets, styled)
    }
}
