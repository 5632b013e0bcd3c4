//! Sprite and icon URL templates
//!
//! Art assets are hosted by third parties behind two fixed URL
//! templates: battle sprites keyed by species name, roster icons by
//! zero-padded dex number. There is no fallback when a URL fails to
//! load.

const SPRITE_BASE: &str = "https://play.pokemonshowdown.com/sprites/afd";
const ICON_BASE: &str = "https://www.serebii.net/pokedex-sm/icon";

/// Battle sprite URL for a species.
pub fn sprite_url(species: &str) -> String {
    format!("{SPRITE_BASE}/{}.png", species.to_lowercase())
}

/// Roster icon URL for a dex number.
pub fn icon_url(dex: u16) -> String {
    format!("{ICON_BASE}/{dex:03}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_url_lowercases_species() {
        assert_eq!(
            sprite_url("Spinda"),
            "https://play.pokemonshowdown.com/sprites/afd/spinda.png"
        );
    }

    #[test]
    fn icon_url_zero_pads_dex() {
        assert_eq!(
            icon_url(2),
            "https://www.serebii.net/pokedex-sm/icon/002.png"
        );
        assert_eq!(
            icon_url(419),
            "https://www.serebii.net/pokedex-sm/icon/419.png"
        );
    }
}
