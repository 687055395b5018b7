//! Actives list
//!
//! Ingredient entries the user marks as applied today. The list lives in
//! memory only and starts from [`default_actives`] on every launch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Concentration shown when none is given
pub const DEFAULT_CONCENTRATION: &str = "N/A";

/// An active ingredient entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Active {
    pub id: String,
    pub name: String,
    /// Ingredient family, e.g. "Antioxidant"
    #[serde(rename = "type")]
    pub kind: String,
    pub concentration: String,
    pub benefits: Vec<String>,
    pub applied_today: bool,
}

impl Active {
    fn preset(id: &str, name: &str, kind: &str, concentration: &str, benefits: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            concentration: concentration.to_string(),
            benefits: benefits.iter().map(|b| b.to_string()).collect(),
            applied_today: false,
        }
    }
}

/// The list every session starts with
pub fn default_actives() -> Vec<Active> {
    vec![
        Active::preset(
            "1",
            "Vitamin C Serum",
            "Antioxidant",
            "15%",
            &["Brightening", "Anti-aging", "Protection"],
        ),
        Active::preset(
            "2",
            "Retinol",
            "Vitamin A Derivative",
            "0.5%",
            &["Anti-aging", "Texture", "Firmness"],
        ),
        Active::preset(
            "3",
            "Niacinamide",
            "B Vitamin",
            "10%",
            &["Pore Minimizing", "Oil Control", "Barrier Support"],
        ),
        Active::preset(
            "4",
            "Hyaluronic Acid",
            "Hydrator",
            "1%",
            &["Hydration", "Plumping", "Dewy Finish"],
        ),
    ]
}

/// Actives errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivesError {
    #[error("Name and type are required")]
    MissingFields,

    #[error("Active not found: {0}")]
    NotFound(String),
}

/// Result type alias for actives operations
pub type ActivesResult<T> = Result<T, ActivesError>;

/// In-memory actives list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivesList {
    actives: Vec<Active>,
}

impl Default for ActivesList {
    fn default() -> Self {
        Self::new(default_actives())
    }
}

impl ActivesList {
    pub fn new(actives: Vec<Active>) -> Self {
        Self { actives }
    }

    pub fn actives(&self) -> &[Active] {
        &self.actives
    }

    pub fn get(&self, id: &str) -> Option<&Active> {
        self.actives.iter().find(|a| a.id == id)
    }

    /// Number of entries applied today
    pub fn applied_count(&self) -> usize {
        self.actives.iter().filter(|a| a.applied_today).count()
    }

    /// Flip the applied-today flag; returns the new flag
    pub fn toggle(&mut self, id: &str) -> ActivesResult<bool> {
        let active = self
            .actives
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ActivesError::NotFound(id.to_string()))?;
        active.applied_today = !active.applied_today;
        tracing::debug!(id = %id, applied = active.applied_today, "Toggled active");
        Ok(active.applied_today)
    }

    /// Add an entry; name and type are required
    ///
    /// The id is `now_ms` as a string, bumped until unused. Benefits start
    /// empty and a blank concentration becomes [`DEFAULT_CONCENTRATION`].
    pub fn add(
        &mut self,
        name: &str,
        kind: &str,
        concentration: &str,
        now_ms: i64,
    ) -> ActivesResult<&Active> {
        let (name, kind) = (name.trim(), kind.trim());
        if name.is_empty() || kind.is_empty() {
            return Err(ActivesError::MissingFields);
        }

        let concentration = match concentration.trim() {
            "" => DEFAULT_CONCENTRATION,
            c => c,
        };

        let mut stamp = now_ms;
        while self.get(&stamp.to_string()).is_some() {
            stamp += 1;
        }

        self.actives.push(Active {
            id: stamp.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            concentration: concentration.to_string(),
            benefits: Vec::new(),
            applied_today: false,
        });
        Ok(&self.actives[self.actives.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let list = ActivesList::default();
        assert_eq!(list.actives().len(), 4);
        assert_eq!(list.applied_count(), 0);

        let retinol = list.get("2").unwrap();
        assert_eq!(retinol.name, "Retinol");
        assert_eq!(retinol.concentration, "0.5%");
        assert_eq!(retinol.benefits, vec!["Anti-aging", "Texture", "Firmness"]);
    }

    #[test]
    fn test_toggle() {
        let mut list = ActivesList::default();
        assert!(list.toggle("3").unwrap());
        assert_eq!(list.applied_count(), 1);
        assert!(!list.get("1").unwrap().applied_today);

        assert!(!list.toggle("3").unwrap());
        assert_eq!(list, ActivesList::default());

        assert_eq!(
            list.toggle("99"),
            Err(ActivesError::NotFound("99".to_string()))
        );
    }

    #[test]
    fn test_add_requires_name_and_type() {
        let mut list = ActivesList::default();
        assert_eq!(
            list.add("Azelaic Acid", " ", "10%", 1).unwrap_err(),
            ActivesError::MissingFields
        );
        assert_eq!(
            list.add("", "Acid", "10%", 1).unwrap_err(),
            ActivesError::MissingFields
        );
        assert_eq!(list.actives().len(), 4);
    }

    #[test]
    fn test_add_defaults() {
        let mut list = ActivesList::default();
        let added = list.add("Azelaic Acid", "Acid", "", 1_700_000_000_000).unwrap();

        assert_eq!(added.id, "1700000000000");
        assert_eq!(added.concentration, "N/A");
        assert!(added.benefits.is_empty());
        assert!(!added.applied_today);

        let second = list.add("Peptides", "Protein", "5%", 1_700_000_000_000).unwrap();
        assert_eq!(second.id, "1700000000001");
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(&default_actives()[3]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "4",
                "name": "Hyaluronic Acid",
                "type": "Hydrator",
                "concentration": "1%",
                "benefits": ["Hydration", "Plumping", "Dewy Finish"],
                "appliedToday": false
            })
        );
    }
}
