//! Static territory tables for the Canary Islands.
//!
//! Island names use the seven canonical forms produced by [`normalize_island`];
//! Lanzarote and La Graciosa share one entry because the bulletins publish a single
//! insular holiday for both.

use crate::utils::{collapse_whitespace, fold_accents};

/// Autonomous community name carried by every Canarias record.
pub const CANARIAS_REGION: &str = "Canarias";

pub const EL_HIERRO: &str = "El Hierro";
pub const LA_PALMA: &str = "La Palma";
pub const LA_GOMERA: &str = "La Gomera";
pub const TENERIFE: &str = "Tenerife";
pub const GRAN_CANARIA: &str = "Gran Canaria";
pub const LANZAROTE_LA_GRACIOSA: &str = "Lanzarote/La Graciosa";
pub const FUERTEVENTURA: &str = "Fuerteventura";

pub const PROVINCE_LAS_PALMAS: &str = "Las Palmas";
pub const PROVINCE_SANTA_CRUZ: &str = "Santa Cruz de Tenerife";

/// Island → municipalities (upper case, accented as published).
pub const ISLAND_MUNICIPALITIES: &[(&str, &[&str])] = &[
    (
        TENERIFE,
        &[
            "ADEJE",
            "ARAFO",
            "ARICO",
            "ARONA",
            "BUENAVISTA DEL NORTE",
            "CANDELARIA",
            "FASNIA",
            "GARACHICO",
            "GRANADILLA DE ABONA",
            "GUÍA DE ISORA",
            "GÜÍMAR",
            "ICOD DE LOS VINOS",
            "LA GUANCHA",
            "LA MATANZA DE ACENTEJO",
            "LA OROTAVA",
            "LA VICTORIA DE ACENTEJO",
            "LOS REALEJOS",
            "LOS SILOS",
            "PUERTO DE LA CRUZ",
            "EL ROSARIO",
            "SAN CRISTÓBAL DE LA LAGUNA",
            "SAN JUAN DE LA RAMBLA",
            "SAN MIGUEL DE ABONA",
            "SANTA CRUZ DE TENERIFE",
            "SANTA ÚRSULA",
            "SANTIAGO DEL TEIDE",
            "EL SAUZAL",
            "TACORONTE",
            "EL TANQUE",
            "TEGUESTE",
            "VILAFLOR DE CHASNA",
        ],
    ),
    (
        LA_PALMA,
        &[
            "BARLOVENTO",
            "BREÑA ALTA",
            "BREÑA BAJA",
            "FUENCALIENTE DE LA PALMA",
            "GARAFÍA",
            "LOS LLANOS DE ARIDANE",
            "EL PASO",
            "PUNTAGORDA",
            "PUNTALLANA",
            "SAN ANDRÉS Y SAUCES",
            "SANTA CRUZ DE LA PALMA",
            "TAZACORTE",
            "TIJARAFE",
            "VILLA DE MAZO",
        ],
    ),
    (
        LA_GOMERA,
        &[
            "AGULO",
            "ALAJERÓ",
            "HERMIGUA",
            "SAN SEBASTIÁN DE LA GOMERA",
            "VALLE GRAN REY",
            "VALLEHERMOSO",
        ],
    ),
    (EL_HIERRO, &["LA FRONTERA", "EL PINAR DE EL HIERRO", "VALVERDE"]),
    (
        GRAN_CANARIA,
        &[
            "AGAETE",
            "AGÜIMES",
            "ARTENARA",
            "ARUCAS",
            "FIRGAS",
            "GÁLDAR",
            "INGENIO",
            "LA ALDEA DE SAN NICOLÁS",
            "LAS PALMAS DE GRAN CANARIA",
            "MOGÁN",
            "MOYA",
            "SAN BARTOLOMÉ DE TIRAJANA",
            "SANTA BRÍGIDA",
            "SANTA LUCÍA",
            "SANTA MARÍA DE GUÍA",
            "TELDE",
            "TEJEDA",
            "TEROR",
            "VALLESECO",
            "VALSEQUILLO",
            "VEGA DE SAN MATEO",
        ],
    ),
    (
        LANZAROTE_LA_GRACIOSA,
        &[
            "ARRECIFE",
            "HARÍA",
            "SAN BARTOLOMÉ DE LANZAROTE",
            "TEGUISE",
            "TÍAS",
            "TINAJO",
            "YAIZA",
        ],
    ),
    (
        FUERTEVENTURA,
        &[
            "ANTIGUA",
            "BETANCURIA",
            "LA OLIVA",
            "PÁJARA",
            "PUERTO DEL ROSARIO",
            "TUINEJE",
        ],
    ),
];

/// Municipalities of the province of Las Palmas; everything else is Santa Cruz de Tenerife.
pub const LAS_PALMAS_MUNICIPALITIES: &[&str] = &[
    "AGAETE",
    "AGÜIMES",
    "ANTIGUA",
    "ARRECIFE",
    "ARTENARA",
    "ARUCAS",
    "BETANCURIA",
    "FIRGAS",
    "GÁLDAR",
    "HARÍA",
    "INGENIO",
    "LA ALDEA DE SAN NICOLÁS",
    "LA OLIVA",
    "LAS PALMAS DE GRAN CANARIA",
    "MOGÁN",
    "MOYA",
    "PÁJARA",
    "PUERTO DEL ROSARIO",
    "SAN BARTOLOMÉ DE LANZAROTE",
    "SAN BARTOLOMÉ DE TIRAJANA",
    "SANTA BRÍGIDA",
    "SANTA LUCÍA",
    "SANTA MARÍA DE GUÍA",
    "TEGUISE",
    "TEJEDA",
    "TELDE",
    "TEROR",
    "TÍAS",
    "TINAJO",
    "TUINEJE",
    "VALLESECO",
    "VALSEQUILLO",
    "VEGA DE SAN MATEO",
    "YAIZA",
];

/// Returns the canonical island of a municipality (exact match after upper-casing).
pub fn island_of(municipality: &str) -> Option<&'static str> {
    let upper = municipality.trim().to_uppercase();
    ISLAND_MUNICIPALITIES
        .iter()
        .find(|(_, municipalities)| municipalities.contains(&upper.as_str()))
        .map(|(island, _)| *island)
}

/// Returns the province a municipality belongs to.
pub fn province_of(municipality: &str) -> &'static str {
    let upper = municipality.trim().to_uppercase();
    if LAS_PALMAS_MUNICIPALITIES.contains(&upper.as_str()) {
        PROVINCE_LAS_PALMAS
    } else {
        PROVINCE_SANTA_CRUZ
    }
}

/// Maps an island mention from bulletin text onto one of the seven canonical names.
///
/// Unknown mentions are returned trimmed but otherwise untouched.
pub fn normalize_island(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let canonical = if lower.contains("hierro") {
        Some(EL_HIERRO)
    } else if lower.contains("palma") && !lower.contains("gran") {
        Some(LA_PALMA)
    } else if lower.contains("gomera") {
        Some(LA_GOMERA)
    } else if lower.contains("tenerife") {
        Some(TENERIFE)
    } else if lower.contains("gran canaria") {
        Some(GRAN_CANARIA)
    } else if lower.contains("lanzarote") || lower.contains("graciosa") {
        Some(LANZAROTE_LA_GRACIOSA)
    } else if lower.contains("fuerteventura") {
        Some(FUERTEVENTURA)
    } else {
        None
    };

    match canonical {
        Some(name) => name.to_string(),
        None => raw.trim().to_string(),
    }
}

/// Comparison key for municipality names: accent-insensitive, case-insensitive,
/// whitespace-collapsed and without a trailing period.
pub fn municipality_key(name: &str) -> String {
    let folded = fold_accents(name).to_lowercase();
    let trimmed = folded.trim().trim_end_matches('.');
    collapse_whitespace(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn island_of_resolves_known_municipalities() {
        assert_eq!(island_of("ADEJE"), Some(TENERIFE));
        assert_eq!(island_of("Teguise"), Some(LANZAROTE_LA_GRACIOSA));
        assert_eq!(island_of("valverde"), Some(EL_HIERRO));
        assert_eq!(island_of("MADRID"), None);
    }

    #[test]
    fn island_of_requires_accents() {
        assert_eq!(island_of("Tías"), Some(LANZAROTE_LA_GRACIOSA));
        assert_eq!(island_of("TIAS"), None);
    }

    #[test]
    fn province_defaults_to_santa_cruz() {
        assert_eq!(province_of("ARRECIFE"), PROVINCE_LAS_PALMAS);
        assert_eq!(province_of("Telde"), PROVINCE_LAS_PALMAS);
        assert_eq!(province_of("ADEJE"), PROVINCE_SANTA_CRUZ);
        assert_eq!(province_of("UNKNOWN"), PROVINCE_SANTA_CRUZ);
    }

    #[test]
    fn normalize_island_canonical_forms() {
        assert_eq!(normalize_island("la isla de El Hierro"), EL_HIERRO);
        assert_eq!(normalize_island("La Palma"), LA_PALMA);
        assert_eq!(normalize_island("la isla de La Gomera"), LA_GOMERA);
        assert_eq!(normalize_island("Tenerife"), TENERIFE);
        assert_eq!(normalize_island("la isla de Gran Canaria"), GRAN_CANARIA);
        assert_eq!(normalize_island("Lanzarote"), LANZAROTE_LA_GRACIOSA);
        assert_eq!(normalize_island("La Graciosa"), LANZAROTE_LA_GRACIOSA);
        assert_eq!(normalize_island("las islas de Lanzarote y La Graciosa"), LANZAROTE_LA_GRACIOSA);
        assert_eq!(normalize_island("Fuerteventura"), FUERTEVENTURA);
        assert_eq!(normalize_island("  Atlántida "), "Atlántida");
    }

    #[test]
    fn every_island_municipality_has_the_matching_province() {
        for (island, municipalities) in ISLAND_MUNICIPALITIES {
            let expected = match *island {
                GRAN_CANARIA | LANZAROTE_LA_GRACIOSA | FUERTEVENTURA => PROVINCE_LAS_PALMAS,
                _ => PROVINCE_SANTA_CRUZ,
            };
            for m in *municipalities {
                assert_eq!(province_of(m), expected, "{m}");
            }
        }
    }

    #[test]
    fn municipality_key_normalizes() {
        assert_eq!(municipality_key("  San  Cristóbal de La Laguna. "), "san cristobal de la laguna");
        assert_eq!(municipality_key("GÜÍMAR."), municipality_key("guimar"));
    }
}
