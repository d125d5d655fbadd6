use std::{fmt, str::FromStr, sync::Arc};

use shared::{domain::ResourceKind, protocol::Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceFilter {
    #[default]
    All,
    Video,
    Document,
}

impl ResourceFilter {
    pub const TABS: [ResourceFilter; 3] = [
        ResourceFilter::All,
        ResourceFilter::Video,
        ResourceFilter::Document,
    ];

    pub fn matches(self, kind: ResourceKind) -> bool {
        match self {
            ResourceFilter::All => true,
            ResourceFilter::Video => kind == ResourceKind::Video,
            ResourceFilter::Document => kind == ResourceKind::Document,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceFilter::All => "all",
            ResourceFilter::Video => "video",
            ResourceFilter::Document => "document",
        }
    }
}

impl fmt::Display for ResourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ResourceFilter::All),
            "video" | "videos" => Ok(ResourceFilter::Video),
            "document" | "documents" | "pdf" | "pdfs" => Ok(ResourceFilter::Document),
            other => Err(format!(
                "unknown resource filter '{other}' (expected all, video or document)"
            )),
        }
    }
}

/// Subset of `resources` matching `filter`, in source order.
pub fn filter_resources(resources: &[Resource], filter: ResourceFilter) -> Vec<&Resource> {
    resources
        .iter()
        .filter(|resource| filter.matches(resource.kind))
        .collect()
}

/// Filtered views over one resource collection snapshot.
///
/// Keyed on the identity of the source `Arc`: [`ResourceView::sync`]
/// recomputes as soon as the store hands out a different collection, so the
/// view never outlives the data it was derived from.
#[derive(Debug, Clone)]
pub struct ResourceView {
    source: Arc<[Resource]>,
    videos: Vec<usize>,
    documents: Vec<usize>,
}

impl ResourceView {
    pub fn new(source: Arc<[Resource]>) -> Self {
        let mut videos = Vec::new();
        let mut documents = Vec::new();
        for (index, resource) in source.iter().enumerate() {
            match resource.kind {
                ResourceKind::Video => videos.push(index),
                ResourceKind::Document => documents.push(index),
                ResourceKind::Unknown => {}
            }
        }
        Self {
            source,
            videos,
            documents,
        }
    }

    /// Returns `true` when `source` differs from the current snapshot and the
    /// view was rebuilt.
    pub fn sync(&mut self, source: &Arc<[Resource]>) -> bool {
        if Arc::ptr_eq(&self.source, source) {
            return false;
        }
        *self = Self::new(Arc::clone(source));
        true
    }

    pub fn source(&self) -> &Arc<[Resource]> {
        &self.source
    }

    pub fn get(&self, filter: ResourceFilter) -> Vec<&Resource> {
        match filter {
            ResourceFilter::All => self.source.iter().collect(),
            ResourceFilter::Video => self.pick(&self.videos),
            ResourceFilter::Document => self.pick(&self.documents),
        }
    }

    pub fn count(&self, filter: ResourceFilter) -> usize {
        match filter {
            ResourceFilter::All => self.source.len(),
            ResourceFilter::Video => self.videos.len(),
            ResourceFilter::Document => self.documents.len(),
        }
    }

    fn pick(&self, indices: &[usize]) -> Vec<&Resource> {
        indices.iter().map(|index| &self.source[*index]).collect()
    }
}

impl Default for ResourceView {
    fn default() -> Self {
        Self::new(Arc::from(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use shared::domain::ResourceId;

    use super::*;

    fn resource(id: &str, kind: ResourceKind) -> Resource {
        Resource {
            id: ResourceId::from(id),
            title: format!("title {id}"),
            description: "desc".into(),
            category: "Mathématiques".into(),
            level: "Lycée".into(),
            kind,
            url: format!("https://example.test/{id}"),
            timestamp: None,
        }
    }

    fn mixed() -> Arc<[Resource]> {
        Arc::from(vec![
            resource("a", ResourceKind::Document),
            resource("b", ResourceKind::Video),
            resource("c", ResourceKind::Unknown),
            resource("d", ResourceKind::Video),
            resource("e", ResourceKind::Document),
        ])
    }

    fn ids(items: &[&Resource]) -> Vec<String> {
        items.iter().map(|r| r.id.0.clone()).collect()
    }

    #[test]
    fn kind_filters_partition_and_stay_within_all() {
        let view = ResourceView::new(mixed());
        let all: HashSet<_> = ids(&view.get(ResourceFilter::All)).into_iter().collect();
        let videos: HashSet<_> = ids(&view.get(ResourceFilter::Video)).into_iter().collect();
        let documents: HashSet<_> = ids(&view.get(ResourceFilter::Document))
            .into_iter()
            .collect();

        assert!(videos.is_disjoint(&documents));
        assert!(videos.union(&documents).all(|id| all.contains(id)));
        assert!(!videos.contains("c") && !documents.contains("c"));
        assert!(all.contains("c"));
    }

    #[test]
    fn preserves_source_order() {
        let view = ResourceView::new(mixed());
        assert_eq!(ids(&view.get(ResourceFilter::All)), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(ids(&view.get(ResourceFilter::Video)), vec!["b", "d"]);
        assert_eq!(ids(&view.get(ResourceFilter::Document)), vec!["a", "e"]);
        assert_eq!(view.count(ResourceFilter::Video), 2);
    }

    #[test]
    fn view_matches_plain_filter_function() {
        let source = mixed();
        let view = ResourceView::new(Arc::clone(&source));
        for filter in ResourceFilter::TABS {
            assert_eq!(
                ids(&view.get(filter)),
                ids(&filter_resources(&source, filter))
            );
        }
    }

    #[test]
    fn sync_rebuilds_only_on_new_collection() {
        let source = mixed();
        let mut view = ResourceView::new(Arc::clone(&source));
        assert!(!view.sync(&source));

        let replacement: Arc<[Resource]> = Arc::from(vec![resource("z", ResourceKind::Video)]);
        assert!(view.sync(&replacement));
        assert_eq!(ids(&view.get(ResourceFilter::Video)), vec!["z"]);
        assert!(view.get(ResourceFilter::Document).is_empty());
    }

    #[test]
    fn parses_filter_names() {
        assert_eq!("pdf".parse::<ResourceFilter>(), Ok(ResourceFilter::Document));
        assert_eq!(" Videos ".parse::<ResourceFilter>(), Ok(ResourceFilter::Video));
        assert!("audio".parse::<ResourceFilter>().is_err());
    }
}
