//! Document classification and chronological ordering.

use crate::models::{Metadata, ResolvedDocument};

/// Views partitioned by date presence, with `dated` sorted ascending.
#[derive(Debug, Default)]
pub struct OrderedViews {
    /// Views without a date, in scan order.
    pub undated: Vec<ResolvedDocument>,

    /// Views with a date, ascending; ties keep scan order.
    pub dated: Vec<ResolvedDocument>,
}

/// Build-wide split of resolved documents.
#[derive(Debug, Default)]
pub struct ClassifiedDocuments {
    pub components: Vec<ResolvedDocument>,
    pub views: OrderedViews,
}

impl ClassifiedDocuments {
    pub fn view_count(&self) -> usize {
        self.views.undated.len() + self.views.dated.len()
    }
}

/// Partition documents into components and views and order the dated views
/// chronologically.
///
/// A document whose date failed to parse arrives here undated, so a single
/// malformed date never aborts the build.
pub fn classify(documents: Vec<ResolvedDocument>) -> ClassifiedDocuments {
    let mut components = Vec::new();
    let mut undated = Vec::new();
    let mut dated = Vec::new();

    for doc in documents {
        if doc.metadata.is_component {
            components.push(doc);
        } else if doc.metadata.date.is_some() {
            dated.push(doc);
        } else {
            undated.push(doc);
        }
    }

    // stable: equal dates keep their scan order
    dated.sort_by_key(|doc| doc.metadata.date);

    ClassifiedDocuments {
        components,
        views: OrderedViews { undated, dated },
    }
}

impl OrderedViews {
    /// Route-table order: undated views first (scan order), then dated
    /// views chronologically. This is a content-priority rule the
    /// generated artifacts must reproduce exactly.
    pub fn in_route_order(&self) -> impl Iterator<Item = &ResolvedDocument> {
        self.undated.iter().chain(self.dated.iter())
    }

    /// Chronological neighbors of `dated[index]`: `(prev, next)`, absent at
    /// the edges.
    pub fn neighbors(&self, index: usize) -> (Option<&Metadata>, Option<&Metadata>) {
        let prev = index
            .checked_sub(1)
            .and_then(|i| self.dated.get(i))
            .map(|doc| &doc.metadata);
        let next = self.dated.get(index + 1).map(|doc| &doc.metadata);
        (prev, next)
    }
}
