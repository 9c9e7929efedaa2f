use std::sync::Arc;

use tracing::debug;

use crate::catalog::RuleCatalog;
use crate::domain::permit::PermitDefinition;

/// Maps a project description and work-type tags onto the permits whose triggers they mention.
#[derive(Clone, Debug)]
pub struct PermitResolver {
    catalog: Arc<RuleCatalog>,
}

impl PermitResolver {
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self { catalog }
    }

    /// Returns matching permits in catalog order. An empty result means no permit applies.
    pub fn resolve<S: AsRef<str>>(
        &self,
        description: &str,
        work_types: &[S],
    ) -> Vec<&PermitDefinition> {
        let search_text = search_text(description, work_types);
        let matched: Vec<_> =
            self.catalog.iter().filter(|permit| permit.matches(&search_text)).collect();

        debug!(
            event_name = "permit.resolver.resolved",
            matched = matched.len(),
            work_type_count = work_types.len(),
            "resolved permits for project description"
        );
        matched
    }
}

fn search_text<S: AsRef<str>>(description: &str, work_types: &[S]) -> String {
    let tags: Vec<&str> = work_types.iter().map(AsRef::as_ref).collect();
    format!("{description} {}", tags.join(" ")).to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::PermitResolver;
    use crate::catalog::RuleCatalog;

    fn resolver() -> PermitResolver {
        let catalog = RuleCatalog::from_json_str(
            r#"{"permits": [
                {"id": "building", "name": "Building Permit",
                 "triggers": ["construction", "addition", "renovation"],
                 "requiredFields": ["projectAddress"], "template": "building.html.tera"},
                {"id": "electrical", "name": "Electrical Permit",
                 "triggers": ["electrical work", "wiring"],
                 "requiredFields": ["ownerName", "electricianLicense"],
                 "template": "electrical.html.tera"},
                {"id": "plumbing", "name": "Plumbing Permit",
                 "triggers": ["plumbing", "water heater"],
                 "requiredFields": ["plumberLicense"], "template": "plumbing.html.tera"}
            ]}"#,
        )
        .expect("fixture catalog");
        PermitResolver::new(Arc::new(catalog))
    }

    fn ids(resolver: &PermitResolver, description: &str, work_types: &[&str]) -> Vec<String> {
        resolver
            .resolve(description, work_types)
            .into_iter()
            .map(|permit| permit.id.0.clone())
            .collect()
    }

    #[test]
    fn wiring_mention_requires_electrical_permit() {
        let resolver = resolver();
        assert_eq!(ids(&resolver, "Need wiring upgrade", &[]), vec!["electrical"]);
    }

    #[test]
    fn results_follow_catalog_order_without_duplicates() {
        let resolver = resolver();
        let matched = ids(
            &resolver,
            "Replace WATER HEATER and add wiring during the renovation",
            &["Electrical Work", "plumbing"],
        );
        assert_eq!(matched, vec!["building", "electrical", "plumbing"]);
    }

    #[test]
    fn work_types_alone_can_trigger_permits() {
        let resolver = resolver();
        assert_eq!(ids(&resolver, "kitchen refresh", &["plumbing"]), vec!["plumbing"]);
    }

    #[test]
    fn empty_input_matches_nothing() {
        let resolver = resolver();
        assert!(ids(&resolver, "", &[]).is_empty());
        assert!(ids(&resolver, "paint the fence", &[]).is_empty());
    }

    #[test]
    fn triggers_can_span_description_and_work_types() {
        let resolver = resolver();
        assert_eq!(ids(&resolver, "general electrical", &["work"]), vec!["electrical"]);
    }
}
