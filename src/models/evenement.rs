//! Event and speaker models (REST backend)

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Speaker gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Sexe {
    #[default]
    Homme,
    Femme,
}

impl std::fmt::Display for Sexe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Homme => write!(f, "Homme"),
            Self::Femme => write!(f, "Femme"),
        }
    }
}

impl std::str::FromStr for Sexe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "homme" => Ok(Self::Homme),
            "femme" => Ok(Self::Femme),
            _ => Err(anyhow::anyhow!("Invalid sexe: {}", s)),
        }
    }
}

/// Speaker (intervenant)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervenant {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub prenom: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nom: String,
    #[serde(default)]
    pub sexe: Sexe,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Intervenant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom).trim().to_string()
    }
}

/// Payload for `POST /intervenants`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIntervenant {
    pub prenom: String,
    pub nom: String,
    pub sexe: Sexe,
}

/// How an event is attended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModeEvenement {
    #[default]
    Presentiel,
    Enligne,
}

impl std::fmt::Display for ModeEvenement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Presentiel => write!(f, "presentiel"),
            Self::Enligne => write!(f, "enligne"),
        }
    }
}

/// Event type; `Autre` carries the free-text precision
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeEvenement {
    #[default]
    Atelier,
    Conference,
    Formation,
    Seminaire,
    Webinaire,
    Autre(String),
}

impl TypeEvenement {
    /// Predefined types offered by the event form (`Autre` excluded)
    pub const PREDEFINED: [TypeEvenement; 5] = [
        Self::Atelier,
        Self::Conference,
        Self::Formation,
        Self::Seminaire,
        Self::Webinaire,
    ];

    /// Value sent to the backend
    pub fn label(&self) -> &str {
        match self {
            Self::Atelier => "Atelier",
            Self::Conference => "Conférence",
            Self::Formation => "Formation",
            Self::Seminaire => "Séminaire",
            Self::Webinaire => "Webinaire",
            Self::Autre(precision) => precision.trim(),
        }
    }

    pub fn is_autre(&self) -> bool {
        matches!(self, Self::Autre(_))
    }
}

impl std::fmt::Display for TypeEvenement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Autre(precision) if precision.trim().is_empty() => write!(f, "Autre"),
            other => write!(f, "{}", other.label()),
        }
    }
}

impl std::str::FromStr for TypeEvenement {
    type Err = std::convert::Infallible;

    /// Unknown labels become `Autre(label)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.trim().to_lowercase().as_str() {
            "atelier" => Self::Atelier,
            "conférence" | "conference" => Self::Conference,
            "formation" => Self::Formation,
            "séminaire" | "seminaire" => Self::Seminaire,
            "webinaire" => Self::Webinaire,
            "autre" => Self::Autre(String::new()),
            _ => Self::Autre(s.trim().to_string()),
        };
        Ok(parsed)
    }
}

/// Event as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evenement {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub libelle: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// `YYYY-MM-DD`
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_debut: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date_fin: String,
    /// `HH:MM`
    #[serde(default)]
    pub heure_debut: Option<String>,
    #[serde(default)]
    pub heure_fin: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub lieu: Option<String>,
    #[serde(default)]
    pub lien: Option<String>,
    /// Storage path of the uploaded image
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intervenants: Vec<Intervenant>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Evenement {
    /// Start date; accepts `YYYY-MM-DD` with or without a time suffix
    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_day(&self.date_debut)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        parse_day(&self.date_fin)
    }

    /// Upper-cased type, `ÉVÉNEMENT` when absent
    pub fn type_badge(&self) -> String {
        match self.kind.as_deref().map(str::trim) {
            Some(kind) if !kind.is_empty() => kind.to_uppercase(),
            _ => "ÉVÉNEMENT".to_string(),
        }
    }

    /// Start time as `HH:MM`, `00:00` when absent
    pub fn start_time(&self) -> String {
        self.heure_debut
            .as_deref()
            .filter(|h| !h.is_empty())
            .map(|h| h.chars().take(5).collect())
            .unwrap_or_else(|| "00:00".to_string())
    }

    /// `lieu`, else `lien`, else `Non spécifié`
    pub fn location(&self) -> &str {
        [self.lieu.as_deref(), self.lien.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or("Non spécifié")
    }

    /// Online events carry a link and no venue
    pub fn mode(&self) -> ModeEvenement {
        let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        if !has(&self.lieu) && has(&self.lien) {
            ModeEvenement::Enligne
        } else {
            ModeEvenement::Presentiel
        }
    }
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Payload for `POST /evenements`
///
/// `lieu` and `lien` are already resolved from the mode: only the one matching
/// the mode is set.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvenement {
    pub libelle: String,
    pub description: String,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    pub heure_debut: NaiveTime,
    pub heure_fin: NaiveTime,
    pub kind: TypeEvenement,
    pub lieu: Option<String>,
    pub lien: Option<String>,
    pub intervenant_ids: Vec<i64>,
}

impl NewEvenement {
    /// Text fields in submission order
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("libelle".to_string(), self.libelle.clone()),
            ("description".to_string(), self.description.clone()),
            ("date_debut".to_string(), self.date_debut.format("%Y-%m-%d").to_string()),
            ("date_fin".to_string(), self.date_fin.format("%Y-%m-%d").to_string()),
            ("heure_debut".to_string(), self.heure_debut.format("%H:%M").to_string()),
            ("heure_fin".to_string(), self.heure_fin.format("%H:%M").to_string()),
            ("type".to_string(), self.kind.label().to_string()),
        ];

        if let Some(lieu) = self.lieu.as_ref().filter(|l| !l.is_empty()) {
            fields.push(("lieu".to_string(), lieu.clone()));
        }
        if let Some(lien) = self.lien.as_ref().filter(|l| !l.is_empty()) {
            fields.push(("lien".to_string(), lien.clone()));
        }
        for (index, id) in self.intervenant_ids.iter().enumerate() {
            fields.push((format!("intervenants[{}]", index), id.to_string()));
        }

        fields
    }
}
