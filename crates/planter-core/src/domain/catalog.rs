//! Entity catalogs: the ordered identifier lists for planters, fields and nectars.
//!
//! Every catalog starts with the sentinel [`NONE`], which stands for "unset" in
//! dropdowns and "inactive" in cycle slots.  The remaining identifiers are the
//! *active* entities; they are what the key space is built from.
//!
//! Catalogs are built once at startup (usually via [`Catalogs::standard`]) and
//! shared behind an `Arc`.  They are never mutated afterwards.

use std::collections::HashSet;

use thiserror::Error;

use crate::keyspace::PLANTER_FIELD_SEPARATOR;

/// Sentinel identifier meaning "unset / inactive" in every domain.
pub const NONE: &str = "none";

const STANDARD_PLANTERS: &[&str] = &[
    NONE,
    "paper",
    "ticket",
    "festive",
    "sticker",
    "plastic",
    "candy",
    "red_clay",
    "blue_clay",
    "tacky",
    "pesticide",
    "heat_treated",
    "hydroponic",
    "petal",
    "planter_of_plenty",
];

const STANDARD_FIELDS: &[&str] = &[
    NONE,
    "sunflower",
    "dandelion",
    "mushroom",
    "blue_flower",
    "clover",
    "strawberry",
    "spider",
    "bamboo",
    "pineapple",
    "stump",
    "cactus",
    "pumpkin",
    "pine_tree",
    "rose",
    "mountain_top",
    "pepper",
    "coconut",
];

const STANDARD_NECTARS: &[&str] = &[
    NONE,
    "comforting",
    "refreshing",
    "satisfying",
    "motivating",
    "invigorating",
];

/// The three entity domains a catalog can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityDomain {
    Planter,
    Field,
    Nectar,
}

impl std::fmt::Display for EntityDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Planter => "planter",
            Self::Field => "field",
            Self::Nectar => "nectar",
        };
        f.write_str(name)
    }
}

/// Errors raised while validating a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("{domain} catalog must contain the \"none\" sentinel exactly once, found {count}")]
    SentinelCount { domain: EntityDomain, count: usize },

    #[error("{domain} catalog contains duplicate identifier {id:?}")]
    Duplicate { domain: EntityDomain, id: String },

    #[error("{domain} catalog contains an empty identifier")]
    EmptyIdentifier { domain: EntityDomain },

    #[error("{domain} identifier {id:?} overlaps the key separator {PLANTER_FIELD_SEPARATOR:?}")]
    ReservedSequence { domain: EntityDomain, id: String },
}

/// True if `id` contains `_field_`, ends in `_field` or starts with `field_`.
///
/// The last two still split ambiguously once joined: planter `a_field` with
/// field `b` and planter `a` with field `field_b` both give
/// `auto_planter_a_field_field_b`.
fn overlaps_separator(id: &str) -> bool {
    let head = PLANTER_FIELD_SEPARATOR.trim_end_matches('_');
    let tail = PLANTER_FIELD_SEPARATOR.trim_start_matches('_');
    id.contains(PLANTER_FIELD_SEPARATOR) || id.ends_with(head) || id.starts_with(tail)
}

/// Ordered, validated list of identifiers for one [`EntityDomain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCatalog {
    domain: EntityDomain,
    ids: Vec<String>,
}

impl EntityCatalog {
    /// Builds a catalog, preserving the given order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the sentinel is missing or repeated, if an
    /// identifier is empty or duplicated, or if an identifier could form the
    /// planter/field key separator with a neighbouring identifier.
    pub fn new<I, S>(domain: EntityDomain, ids: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();

        let sentinels = ids.iter().filter(|id| id.as_str() == NONE).count();
        if sentinels != 1 {
            return Err(CatalogError::SentinelCount {
                domain,
                count: sentinels,
            });
        }

        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if id.is_empty() {
                return Err(CatalogError::EmptyIdentifier { domain });
            }
            if overlaps_separator(id) {
                return Err(CatalogError::ReservedSequence {
                    domain,
                    id: id.clone(),
                });
            }
            if !seen.insert(id.as_str()) {
                return Err(CatalogError::Duplicate {
                    domain,
                    id: id.clone(),
                });
            }
        }

        Ok(Self { domain, ids })
    }

    pub fn domain(&self) -> EntityDomain {
        self.domain
    }

    /// All identifiers including the sentinel, in catalog order.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Identifiers excluding the sentinel, in catalog order.
    pub fn active(&self) -> impl Iterator<Item = &str> {
        self.all().filter(|id| *id != NONE)
    }

    /// Number of non-sentinel identifiers.
    pub fn active_len(&self) -> usize {
        self.ids.len() - 1
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }
}

/// The planter, field and nectar catalogs bundled together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogs {
    pub planters: EntityCatalog,
    pub fields: EntityCatalog,
    pub nectars: EntityCatalog,
}

impl Catalogs {
    /// Bundles three catalogs.  Each argument must describe the matching domain.
    pub fn new(planters: EntityCatalog, fields: EntityCatalog, nectars: EntityCatalog) -> Self {
        debug_assert_eq!(planters.domain(), EntityDomain::Planter);
        debug_assert_eq!(fields.domain(), EntityDomain::Field);
        debug_assert_eq!(nectars.domain(), EntityDomain::Nectar);
        Self {
            planters,
            fields,
            nectars,
        }
    }

    /// The built-in catalogs shipped with the macro.
    pub fn standard() -> Self {
        // The standard lists are static and known to be valid.
        let build = |domain, ids: &[&str]| EntityCatalog {
            domain,
            ids: ids.iter().map(|id| (*id).to_string()).collect(),
        };
        Self {
            planters: build(EntityDomain::Planter, STANDARD_PLANTERS),
            fields: build(EntityDomain::Field, STANDARD_FIELDS),
            nectars: build(EntityDomain::Nectar, STANDARD_NECTARS),
        }
    }

    /// Number of nectar priority slots, one per non-sentinel nectar.
    pub fn priority_slots(&self) -> usize {
        self.nectars.active_len()
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::standard()
    }
}
