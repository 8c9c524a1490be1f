//! Common test utilities for integration tests

use festivos_cli::config::ResolvedConfig;
use festivos_cli::errors::{AppError, AppResult};
use festivos_cli::source::Fetch;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory [`Fetch`] implementation: known URLs return their body, anything else
/// fails like an HTTP 404.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn lookup(&self, url: &str) -> AppResult<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::NetworkError(format!("HTTP 404: Failed to fetch {url}")))
    }
}

impl Fetch for MapFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> AppResult<String> {
        self.lookup(url)
    }

    async fn fetch_json(&self, url: &str, _timeout: Duration) -> AppResult<serde_json::Value> {
        let body = self.lookup(url)?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Configuration rooted in a temporary directory.
#[allow(dead_code)]
pub fn test_config(root: &Path) -> ResolvedConfig {
    ResolvedConfig {
        cache_dir: root.join("config"),
        output_dir: root.join("data"),
        ..ResolvedConfig::default()
    }
}

/// BOE resolution excerpt with the national holiday table.
#[allow(dead_code)]
pub const BOE_RESOLUTION: &str = r#"<html><body>
<h3>Resolución de la Dirección General de Trabajo, por la que se publica la relación de fiestas laborales para el año 2030.</h3>
<table>
<tr><th>Fecha</th><th>Fiesta</th></tr>
<tr><td>1 de enero</td><td>Año Nuevo</td></tr>
<tr><td>6 de enero</td><td>Epifanía del Señor</td></tr>
<tr><td>Abril</td><td>18 Jueves Santo</td></tr>
<tr><td>Abril</td><td>19 Viernes Santo</td></tr>
<tr><td>1 de mayo</td><td>Fiesta del Trabajo</td></tr>
</table>
</body></html>"#;

/// BOC decree excerpt with regional and island holidays.
#[allow(dead_code)]
pub const BOC_DECREE: &str = "<html><body>\
<p>Artículo 1. Fiestas de la Comunidad Autónoma: el 30 de mayo, Día de Canarias.</p>\
<p>Artículo 2. Fiestas insulares. En El Hierro: el 25 de septiembre, festividad de \
Nuestra Señora de los Reyes. En Fuerteventura: el 18 de septiembre, festividad de \
Nuestra Señora de la Peña. En Gran Canaria: el 8 de septiembre, festividad de \
Nuestra Señora del Pino. En La Gomera: el 5 de octubre, festividad de Nuestra \
Señora de Guadalupe. En La Palma: el 5 de agosto, festividad de Nuestra Señora de \
las Nieves. En Lanzarote y La Graciosa: el 15 de septiembre, festividad de Nuestra \
Señora de los Volcanes. En Tenerife: el 2 de febrero, festividad de la Candelaria.</p>\
</body></html>";

/// BOC order excerpt with municipal holidays.
#[allow(dead_code)]
pub const BOC_LOCAL_ORDER: &str = "<html><body><pre>
ORDEN por la que se determinan las fiestas locales.

ADEJE.
2 febrero: Festividad de la Candelaria
13 de junio: San Antonio de Padua

ARRECIFE.
25 de agosto: San Ginés
7 de octubre: Nuestra Señora del Rosario

SAN CRISTÓBAL DE LA LAGUNA.
14 de septiembre: Santísimo Cristo de La Laguna
2 febrero: Repetido
2 febrero: Repetido otra vez
</pre></body></html>";
