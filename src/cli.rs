//! Output of the one-shot `--list` and `--lookup` modes.

use tracing::warn;

use crate::app::NO_RESULT;
use crate::error::FetchError;
use crate::models::PokemonRecord;
use crate::utils::clean_text;

/// Text printed by `--lookup`. Failures degrade to [`NO_RESULT`] (or `null`
/// with `json`), the same as a search in the interface.
pub fn render_lookup(result: Result<Option<PokemonRecord>, FetchError>, json: bool) -> String {
    let record = result.unwrap_or_else(|e| {
        warn!(error = %e, "lookup failed");
        None
    });
    match record {
        Some(p) if json => serde_json::to_string_pretty(&p).unwrap_or_else(|e| {
            warn!(error = %e, "could not encode record");
            "null".to_string()
        }),
        None if json => "null".to_string(),
        Some(mut p) => {
            p.description = clean_text(&p.description);
            let mut out = p.summary();
            if let Some(url) = &p.sprite {
                out.push_str(&format!("\nSprite: {}", url));
            }
            out
        }
        None => NO_RESULT.to_string(),
    }
}

/// One name per line for `--list`. A failed fetch prints nothing.
pub fn render_names(result: Result<Vec<String>, FetchError>) -> String {
    let names = result.unwrap_or_else(|e| {
        warn!(error = %e, "name list failed");
        Vec::new()
    });
    names.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn pikachu() -> PokemonRecord {
        PokemonRecord {
            name: "pikachu".into(),
            height: 4,
            weight: 60,
            description: "A mouse-type\nPokémon.".into(),
            sprite: Some("http://x/img.png".into()),
        }
    }

    #[test]
    fn lookup_found_prints_block() {
        assert_eq!(
            render_lookup(Ok(Some(pikachu())), false),
            concat!(
                "Name: pikachu\nHeight: 4\nWeight: 60\n",
                "Description: A mouse-type Pokémon.\n",
                "Sprite: http://x/img.png"
            )
        );
    }

    #[test]
    fn lookup_found_as_json() {
        let out = render_lookup(Ok(Some(pikachu())), true);
        let back: PokemonRecord = serde_json::from_str(&out).unwrap();
        assert_eq!(back, pikachu());
    }

    #[test]
    fn lookup_miss_and_error_degrade() {
        assert_eq!(render_lookup(Ok(None), false), "No Pokemon Result");
        assert_eq!(
            render_lookup(Err(FetchError::Status(StatusCode::BAD_GATEWAY)), false),
            "No Pokemon Result"
        );
        assert_eq!(render_lookup(Ok(None), true), "null");
        assert_eq!(
            render_lookup(Err(FetchError::Status(StatusCode::BAD_GATEWAY)), true),
            "null"
        );
    }

    #[test]
    fn names_one_per_line_or_nothing() {
        let names = vec!["abra".to_string(), "bulbasaur".to_string()];
        assert_eq!(render_names(Ok(names)), "abra\nbulbasaur");
        assert_eq!(render_names(Err(FetchError::Status(StatusCode::NOT_FOUND))), "");
    }
}
