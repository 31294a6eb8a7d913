use std::io::IsTerminal;

use clap::{
  ValueEnum,
  builder::styling::{Ansi256Color, Color as ClapColor, RgbColor, Style, Styles},
};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// One semantic color with a variant per terminal background.
#[derive(Debug, Clone, Copy)]
struct Swatch {
  dark: Color,
  light: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
  Color::Rgb { r, g, b }
}

const TIMESTAMP: Swatch = Swatch {
  dark: rgb(110, 150, 170),
  light: rgb(80, 70, 60),
};
const PRIMARY: Swatch = Swatch {
  dark: rgb(49, 120, 198),
  light: rgb(28, 62, 110),
};
const ACCENT: Swatch = Swatch {
  dark: rgb(214, 110, 80),
  light: rgb(190, 72, 50),
};
const INFO: Swatch = Swatch {
  dark: rgb(110, 150, 170),
  light: rgb(40, 111, 170),
};
const SUCCESS: Swatch = Swatch {
  dark: rgb(120, 190, 140),
  light: rgb(34, 142, 90),
};
const LABEL: Swatch = Swatch {
  dark: rgb(120, 170, 230),
  light: rgb(60, 90, 160),
};
const VALUE: Swatch = Swatch {
  dark: rgb(240, 220, 120),
  light: rgb(150, 110, 40),
};
const MUTED: Swatch = Swatch {
  dark: rgb(105, 105, 105),
  light: rgb(160, 160, 160),
};

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

pub trait IntoComfyColor {
  fn into(self) -> ComfyColor;
}

/// The palette is truecolor, so only RGB and 256-color values carry over; anything else resets.
impl IntoComfyColor for Color {
  fn into(self) -> ComfyColor {
    match self {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(value) => ComfyColor::AnsiValue(value),
      _ => ComfyColor::Reset,
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn pick(&self, swatch: Swatch) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    match self.theme {
      Theme::Dark => swatch.dark,
      Theme::Light => swatch.light,
    }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(TIMESTAMP)
  }

  pub const fn primary(&self) -> Color {
    self.pick(PRIMARY)
  }

  pub const fn accent(&self) -> Color {
    self.pick(ACCENT)
  }

  pub const fn info(&self) -> Color {
    self.pick(INFO)
  }

  pub const fn success(&self) -> Color {
    self.pick(SUCCESS)
  }

  pub const fn label(&self) -> Color {
    self.pick(LABEL)
  }

  pub const fn value(&self) -> Color {
    self.pick(VALUE)
  }

  /// Rows and cells that are present but not active, e.g. filtered-out operations.
  pub const fn muted(&self) -> Color {
    self.pick(MUTED)
  }

  const fn to_clap(color: Color) -> Option<ClapColor> {
    match color {
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::AnsiValue(value) => Some(ClapColor::Ansi256(Ansi256Color(value))),
      _ => None,
    }
  }

  /// Help output styling. Always uses the dark palette since clap has no theme detection.
  pub const fn clap_styles() -> Styles {
    let colors = Self::new(true, Theme::Dark);

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(colors.label())))
      .usage(Style::new().bold().fg_color(Self::to_clap(colors.label())))
      .literal(Style::new().fg_color(Self::to_clap(colors.success())))
      .placeholder(Style::new().fg_color(Self::to_clap(colors.info())))
      .error(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
      .valid(Style::new().fg_color(Self::to_clap(colors.success())))
      .invalid(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .as_deref()
      .and_then(theme_from_colorfgbg)
      .unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`). Background indices 8 and up are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let bg = value.split(';').next_back()?.parse::<u8>().ok()?;
  Some(if bg >= 8 { Theme::Light } else { Theme::Dark })
}
