use crate::catalog::{Category, CategoryNode, Feature, FeatureCatalog};
use drill_domain::license::LicenseConfig;
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

/// Three-way availability of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RollupStatus {
    All,
    None,
    Partial,
}

/// Feature counts below a category node. Features are counted per leaf occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rollup {
    pub total: usize,
    pub available: usize,
    pub status: RollupStatus,
}

impl Rollup {
    /// An empty node reports [`RollupStatus::None`].
    #[must_use]
    pub const fn from_counts(total: usize, available: usize) -> Self {
        let status = if available == 0 {
            RollupStatus::None
        } else if available == total {
            RollupStatus::All
        } else {
            RollupStatus::Partial
        };
        Self { total, available, status }
    }

    const fn merge(self, other: Self) -> Self {
        Self::from_counts(self.total + other.total, self.available + other.available)
    }
}

/// Catalog-wide availability over distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub available: usize,
    pub total: usize,
    pub percentage: u8,
    pub status: RollupStatus,
}

/// A leaf category with its position in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatCategory<'a> {
    pub path: Vec<&'static str>,
    pub label: &'static str,
    pub depth: usize,
    pub features: &'a [Feature],
}

/// One line of the rendered tree: every node in pre-order with its rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    pub name: &'static str,
    pub depth: usize,
    pub rollup: Rollup,
    /// Leaf features with their availability; empty for branches.
    pub features: Vec<(&'static str, &'static str, bool)>,
}

impl FeatureCatalog {
    /// Rollup of `category` under `config`, using [`Self::is_feature_available`].
    #[must_use]
    pub fn rollup(&self, category: &Category, config: &LicenseConfig) -> Rollup {
        match &category.node {
            CategoryNode::Leaf(features) => {
                let available =
                    features.iter().filter(|f| self.is_feature_available(f.key, config)).count();
                Rollup::from_counts(features.len(), available)
            },
            CategoryNode::Branch(children) => children
                .iter()
                .map(|child| self.rollup(child, config))
                .fold(Rollup::from_counts(0, 0), Rollup::merge),
        }
    }

    /// Leaf categories in depth-first order.
    #[must_use]
    pub fn flatten(&self) -> Vec<FlatCategory<'_>> {
        fn walk<'a>(
            categories: &'a [Category],
            path: &[&'static str],
            out: &mut Vec<FlatCategory<'a>>,
        ) {
            for category in categories {
                let mut current = path.to_vec();
                current.push(category.name);
                match &category.node {
                    CategoryNode::Leaf(features) => out.push(FlatCategory {
                        depth: current.len(),
                        label: category.name,
                        path: current,
                        features,
                    }),
                    CategoryNode::Branch(children) => walk(children, &current, out),
                }
            }
        }

        let mut out = Vec::new();
        walk(self.tree(), &[], &mut out);
        out
    }

    /// Every node with its rollup, ready for rendering.
    #[must_use]
    pub fn report(&self, config: &LicenseConfig) -> Vec<CategoryReport> {
        fn walk(
            catalog: &FeatureCatalog,
            categories: &[Category],
            depth: usize,
            config: &LicenseConfig,
            out: &mut Vec<CategoryReport>,
        ) {
            for category in categories {
                let features = match &category.node {
                    CategoryNode::Leaf(features) => features
                        .iter()
                        .map(|f| (f.key, f.name, catalog.is_feature_available(f.key, config)))
                        .collect(),
                    CategoryNode::Branch(_) => Vec::new(),
                };
                out.push(CategoryReport {
                    name: category.name,
                    depth,
                    rollup: catalog.rollup(category, config),
                    features,
                });
                if let CategoryNode::Branch(children) = &category.node {
                    walk(catalog, children, depth + 1, config, out);
                }
            }
        }

        let mut out = Vec::new();
        walk(self, self.tree(), 1, config, &mut out);
        out
    }

    /// Overall availability across distinct catalog keys.
    #[must_use]
    pub fn summary(&self, config: &LicenseConfig) -> Summary {
        let keys = self.keys();
        let total = keys.len();
        let available = keys.iter().filter(|key| self.is_feature_available(key, config)).count();
        let Rollup { status, .. } = Rollup::from_counts(total, available);

        Summary { available, total, percentage: percentage(available, total), status }
    }
}

/// Rounded share in percent, half away from zero; `0` for an empty catalog.
fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (part * 200 + total) / (total * 2);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}
