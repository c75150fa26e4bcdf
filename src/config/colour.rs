//! Parsing colour values from the configuration file

use crossterm::style::Color;

use super::ConfigError;

/// Converts a colour name or hex string into a terminal colour.
///
/// Accepts the sixteen standard terminal colour names (with or without an
/// underscore, e.g. `dark_red` or `darkred`), `reset`, and `#rrggbb` / `#rgb`.
pub fn str_to_colour(value: &str) -> Result<Color, ConfigError> {
    let trimmed = value.trim();
    if trimmed.starts_with('#') {
        hex_to_colour(trimmed)
    } else {
        name_to_colour(trimmed)
    }
}

fn name_to_colour(name: &str) -> Result<Color, ConfigError> {
    let normalized: String = name
        .chars()
        .filter(|c| *c != '_' && *c != '-' && *c != ' ')
        .flat_map(char::to_lowercase)
        .collect();

    let colour = match normalized.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        _ => return Err(ConfigError::UnknownColour(name.to_string())),
    };

    Ok(colour)
}

fn hex_to_colour(hex: &str) -> Result<Color, ConfigError> {
    let digits = &hex[1..];
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::UnknownColour(hex.to_string()));
    }

    let component = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| ConfigError::UnknownColour(hex.to_string()))
    };

    match digits.len() {
        6 => Ok(Color::Rgb {
            r: component(&digits[0..2])?,
            g: component(&digits[2..4])?,
            b: component(&digits[4..6])?,
        }),
        3 => {
            // "#1a2" expands each digit, like CSS
            let double = |i: usize| component(&digits[i..=i].repeat(2));
            Ok(Color::Rgb {
                r: double(0)?,
                g: double(1)?,
                b: double(2)?,
            })
        }
        _ => Err(ConfigError::UnknownColour(hex.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colours() {
        assert_eq!(str_to_colour("red").unwrap(), Color::Red);
        assert_eq!(str_to_colour("Dark_Red").unwrap(), Color::DarkRed);
        assert_eq!(str_to_colour("darkyellow").unwrap(), Color::DarkYellow);
        assert_eq!(str_to_colour(" CYAN ").unwrap(), Color::Cyan);
        assert_eq!(str_to_colour("gray").unwrap(), Color::Grey);
    }

    #[test]
    fn test_hex_colours() {
        assert_eq!(
            str_to_colour("#ff8000").unwrap(),
            Color::Rgb { r: 255, g: 128, b: 0 }
        );
        assert_eq!(
            str_to_colour("#1a2").unwrap(),
            Color::Rgb { r: 0x11, g: 0xaa, b: 0x22 }
        );
    }

    #[test]
    fn test_invalid_colours() {
        assert!(str_to_colour("chartreuse").is_err());
        assert!(str_to_colour("#12345").is_err());
        assert!(str_to_colour("#gg0000").is_err());
        assert!(str_to_colour("").is_err());
    }
}
