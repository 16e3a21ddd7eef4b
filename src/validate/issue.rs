//! Validation findings and the aggregate result handed back to the editor.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks code generation and deploy.
    Error,
    Warning,
}

/// Stable machine codes, one per rule. Each code has a fixed severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    EmptyCanvas,
    MissingLabel,
    DanglingEdge,
    SelfLoop,
    ApiNoRoute,
    ApiRouteSlash,
    ApiRouteSpaces,
    ApiNoMethod,
    DuplicateRoute,
    IsolatedApi,
    ProcNoSteps,
    DbNoTables,
    TableNoFields,
    QueueBadDelivery,
    DuplicateLabel,
    OrphanNode,
    ApiEndpointUnlinked,
    ApiEndpointDanglingRef,
    NoFunctions,
    DbNoFunctions,
    AllIsolated,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCode::EmptyCanvas => "EMPTY_CANVAS",
            IssueCode::MissingLabel => "MISSING_LABEL",
            IssueCode::DanglingEdge => "DANGLING_EDGE",
            IssueCode::SelfLoop => "SELF_LOOP",
            IssueCode::ApiNoRoute => "API_NO_ROUTE",
            IssueCode::ApiRouteSlash => "API_ROUTE_SLASH",
            IssueCode::ApiRouteSpaces => "API_ROUTE_SPACES",
            IssueCode::ApiNoMethod => "API_NO_METHOD",
            IssueCode::DuplicateRoute => "DUPLICATE_ROUTE",
            IssueCode::IsolatedApi => "ISOLATED_API",
            IssueCode::ProcNoSteps => "PROC_NO_STEPS",
            IssueCode::DbNoTables => "DB_NO_TABLES",
            IssueCode::TableNoFields => "TABLE_NO_FIELDS",
            IssueCode::QueueBadDelivery => "QUEUE_BAD_DELIVERY",
            IssueCode::DuplicateLabel => "DUPLICATE_LABEL",
            IssueCode::OrphanNode => "ORPHAN_NODE",
            IssueCode::ApiEndpointUnlinked => "API_ENDPOINT_UNLINKED",
            IssueCode::ApiEndpointDanglingRef => "API_ENDPOINT_DANGLING_REF",
            IssueCode::NoFunctions => "NO_FUNCTIONS",
            IssueCode::DbNoFunctions => "DB_NO_FUNCTIONS",
            IssueCode::AllIsolated => "ALL_ISOLATED",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            IssueCode::EmptyCanvas
            | IssueCode::MissingLabel
            | IssueCode::DanglingEdge
            | IssueCode::ApiNoRoute
            | IssueCode::ApiRouteSlash
            | IssueCode::ApiRouteSpaces
            | IssueCode::ApiNoMethod
            | IssueCode::DuplicateRoute
            | IssueCode::QueueBadDelivery
            | IssueCode::ApiEndpointDanglingRef => Severity::Error,
            IssueCode::SelfLoop
            | IssueCode::IsolatedApi
            | IssueCode::ProcNoSteps
            | IssueCode::DbNoTables
            | IssueCode::TableNoFields
            | IssueCode::DuplicateLabel
            | IssueCode::OrphanNode
            | IssueCode::ApiEndpointUnlinked
            | IssueCode::NoFunctions
            | IssueCode::DbNoFunctions
            | IssueCode::AllIsolated => Severity::Warning,
        }
    }

    /// Short heading shown above the message in the issue list.
    pub fn title(self) -> &'static str {
        match self {
            IssueCode::EmptyCanvas => "Empty canvas",
            IssueCode::MissingLabel => "Missing label",
            IssueCode::DanglingEdge => "Dangling edge",
            IssueCode::SelfLoop => "Self-loop",
            IssueCode::ApiNoRoute => "Missing route",
            IssueCode::ApiRouteSlash => "Route must start with /",
            IssueCode::ApiRouteSpaces => "Route contains spaces",
            IssueCode::ApiNoMethod => "Missing HTTP method",
            IssueCode::DuplicateRoute => "Duplicate route",
            IssueCode::IsolatedApi => "Isolated API",
            IssueCode::ProcNoSteps => "Function has no steps",
            IssueCode::DbNoTables => "Database has no tables",
            IssueCode::TableNoFields => "Table has no fields",
            IssueCode::QueueBadDelivery => "Invalid delivery guarantee",
            IssueCode::DuplicateLabel => "Duplicate label",
            IssueCode::OrphanNode => "Orphan node",
            IssueCode::ApiEndpointUnlinked => "Endpoint not linked",
            IssueCode::ApiEndpointDanglingRef => "Endpoint references missing API",
            IssueCode::NoFunctions => "No functions",
            IssueCode::DbNoFunctions => "Database without functions",
            IssueCode::AllIsolated => "Nothing is connected",
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Tab the highlighted node lives on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_node_ids: Vec<String>,
}

impl ValidationIssue {
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            title: code.title().to_string(),
            message: message.into(),
            suggestion: None,
            node_id: None,
            tab: None,
            related_node_ids: Vec::new(),
        }
    }

    pub fn at(mut self, tab: &str, node_id: &str) -> Self {
        self.tab = Some(tab.to_string());
        self.node_id = Some(node_id.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_related(mut self, ids: Vec<String>) -> Self {
        self.related_node_ids = ids;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "[{}] {} (node '{}')", self.code, self.message, id),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Size counters reported next to the issue lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    /// Nodes excluding service boundaries.
    pub node_count: usize,
    pub edge_count: usize,
    pub tab_count: usize,
    pub boundary_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub stats: GraphStats,
}

impl ValidationResult {
    /// Split issues by severity. `valid` holds exactly when no error remains.
    pub fn from_issues(issues: Vec<ValidationIssue>, stats: GraphStats) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            issues.into_iter().partition(ValidationIssue::is_error);
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            stats,
        }
    }

    /// Errors first, then warnings.
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn issues_for_node<'r>(
        &'r self,
        node_id: &'r str,
    ) -> impl Iterator<Item = &'r ValidationIssue> + 'r {
        self.issues().filter(move |i| {
            i.node_id.as_deref() == Some(node_id)
                || i.related_node_ids.iter().any(|id| id == node_id)
        })
    }

    pub fn has_code(&self, code: IssueCode) -> bool {
        self.issues().any(|i| i.code == code)
    }

    pub fn count_code(&self, code: IssueCode) -> usize {
        self.issues().filter(|i| i.code == code).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_split_drives_validity() {
        let issues = vec![
            ValidationIssue::new(IssueCode::SelfLoop, "loop"),
            ValidationIssue::new(IssueCode::MissingLabel, "no label").at("api", "n1"),
        ];
        let result = ValidationResult::from_issues(issues, GraphStats::default());
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.issues_for_node("n1").count(), 1);
    }

    #[test]
    fn warnings_alone_keep_result_valid() {
        let issues = vec![ValidationIssue::new(IssueCode::OrphanNode, "alone")];
        let result = ValidationResult::from_issues(issues, GraphStats::default());
        assert!(result.valid);
    }

    #[test]
    fn code_serializes_screaming_snake() {
        let json = serde_json::to_string(&IssueCode::ApiEndpointDanglingRef).unwrap();
        assert_eq!(json, "\"API_ENDPOINT_DANGLING_REF\"");
        assert_eq!(IssueCode::ApiEndpointDanglingRef.as_str(), "API_ENDPOINT_DANGLING_REF");
    }

    #[test]
    fn display_includes_node() {
        let issue = ValidationIssue::new(IssueCode::ProcNoSteps, "no steps").at("functions", "p1");
        assert_eq!(issue.to_string(), "[PROC_NO_STEPS] no steps (node 'p1')");
    }
}
