//! Response shape of the results endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sortefacil_core::DrawRecord;

use crate::client::FetchError;

const API_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDraw {
    pub numero: u32,
    pub data_apuracao: String,
    #[serde(default)]
    pub lista_dezenas: Option<Vec<String>>,
    #[serde(default)]
    pub acumulado: Option<bool>,
    #[serde(default)]
    pub valor_acumulado_proximo_concurso: Option<f64>,
    #[serde(default)]
    pub valor_acumulado_concurso_especial: Option<f64>,
    #[serde(default)]
    pub valor_estimado_proximo_concurso: Option<f64>,
}

impl ApiDraw {
    pub fn into_record(self) -> Result<DrawRecord, FetchError> {
        let date = NaiveDate::parse_from_str(self.data_apuracao.trim(), API_DATE_FORMAT)
            .map_err(|e| {
                FetchError::InvalidPayload(format!(
                    "contest {}: bad date '{}': {}",
                    self.numero, self.data_apuracao, e
                ))
            })?;

        Ok(DrawRecord {
            contest: self.numero,
            date,
            numbers: self.lista_dezenas.unwrap_or_default(),
            accumulated: self.acumulado,
            next_accumulated_prize: self.valor_acumulado_proximo_concurso,
            special_accumulated_prize: self.valor_acumulado_concurso_especial,
            next_estimated_prize: self.valor_estimado_proximo_concurso,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEGASENA_JSON: &str = r#"{
        "acumulado": true,
        "dataApuracao": "02/03/2024",
        "listaDezenas": ["05", "13", "29", "38", "41", "57"],
        "numero": 2698,
        "tipoJogo": "MEGA_SENA",
        "valorAcumuladoConcursoEspecial": 43181123.51,
        "valorAcumuladoProximoConcurso": 62115012.34,
        "valorEstimadoProximoConcurso": 70000000.0
    }"#;

    #[test]
    fn test_parse_full_payload() {
        let api: ApiDraw = serde_json::from_str(MEGASENA_JSON).unwrap();
        let record = api.into_record().unwrap();

        assert_eq!(record.contest, 2698);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(record.numbers, vec!["05", "13", "29", "38", "41", "57"]);
        assert_eq!(record.accumulated, Some(true));
        assert_eq!(record.next_estimated_prize, Some(70000000.0));
    }

    #[test]
    fn test_missing_numbers_default_to_empty() {
        let json = r#"{"numero": 5800, "dataApuracao": "10/01/2024", "listaDezenas": null}"#;
        let api: ApiDraw = serde_json::from_str(json).unwrap();
        let record = api.into_record().unwrap();
        assert!(record.numbers.is_empty());
        assert_eq!(record.accumulated, None);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let json = r#"{"numero": 12, "dataApuracao": "2024-01-10", "listaDezenas": ["01"]}"#;
        let api: ApiDraw = serde_json::from_str(json).unwrap();
        assert!(matches!(api.into_record(), Err(FetchError::InvalidPayload(_))));
    }
}
