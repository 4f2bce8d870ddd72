// src/github/graph.rs
// GraphQL client for Projects (v2) boards

use super::error::{ClientError, ClientResult};
use super::types::{BoardItem, Project, RepoRef};
use super::ProjectBoardApi;
use crate::config::GithubConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

const PROJECT_FIELDS: &str = "id number title shortDescription url";

const REPOSITORY_IDS_QUERY: &str = r#"
query RepositoryIds($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    id
    owner { id }
  }
}"#;

const LIST_PROJECTS_QUERY: &str = r#"
query RepositoryProjects($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    projectsV2(first: 100) {
      nodes { id number title shortDescription url }
    }
  }
}"#;

const ADD_ITEM_MUTATION: &str = r#"
mutation AddProjectItem($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: {projectId: $projectId, contentId: $contentId}) {
    item { id }
  }
}"#;

/// Issues structured queries and mutations against the GraphQL endpoint
pub struct GraphClient {
    http: Client,
    endpoint: String,
    token: String,
}

/// Failed mutations come back with their field nulled, so `data` is only
/// decoded once `errors` is known to be empty
#[derive(Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

/// Wire shape of a ProjectV2 node
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectNode {
    id: String,
    number: u64,
    title: String,
    short_description: Option<String>,
    url: Option<String>,
}

impl From<ProjectNode> for Project {
    fn from(node: ProjectNode) -> Self {
        Self {
            id: node.id,
            number: node.number,
            title: node.title,
            description: node.short_description.filter(|d| !d.is_empty()),
            url: node.url,
        }
    }
}

#[derive(Deserialize)]
struct RepositoryIdsData {
    repository: Option<RepositoryIds>,
}

#[derive(Deserialize)]
struct RepositoryIds {
    id: String,
    owner: NodeId,
}

#[derive(Deserialize)]
struct NodeId {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectData {
    create_project_v2: ProjectPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProjectData {
    update_project_v2: ProjectPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectPayload {
    project_v2: ProjectNode,
}

#[derive(Deserialize)]
struct ListProjectsData {
    repository: Option<RepositoryProjects>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryProjects {
    projects_v2: Connection<ProjectNode>,
}

#[derive(Deserialize)]
struct Connection<T> {
    #[serde(default = "Vec::new")]
    nodes: Vec<Option<T>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemData {
    add_project_v2_item_by_id: AddItemPayload,
}

#[derive(Deserialize)]
struct AddItemPayload {
    item: BoardItem,
}

impl GraphClient {
    pub fn new(http: Client, config: &GithubConfig) -> Self {
        Self {
            http,
            endpoint: config.graphql_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Run one query/mutation; GraphQL-level errors win over partial data
    async fn execute<T: DeserializeOwned>(
        &self,
        op: &str,
        query: &str,
        variables: Value,
    ) -> ClientResult<T> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| {
                warn!(op, error = %e, "GitHub GraphQL request failed");
                ClientError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::from_status(status, &headers, &body);
            warn!(op, status = %status, kind = %err.kind(), "GitHub GraphQL call rejected");
            return Err(err);
        }

        let text = response.text().await.map_err(ClientError::from)?;
        let undecodable = |e: serde_json::Error| {
            ClientError::unknown(format!("{}: undecodable response: {}", op, e))
        };
        let parsed: GraphqlResponse = serde_json::from_str(&text).map_err(undecodable)?;

        if let Some(first) = parsed.errors.into_iter().next() {
            let err = ClientError::from_graphql_type(first.error_type.as_deref(), first.message);
            warn!(op, kind = %err.kind(), "GitHub GraphQL returned errors");
            return Err(err);
        }

        let data = parsed
            .data
            .filter(|d| !d.is_null())
            .ok_or_else(|| ClientError::unknown(format!("{}: response carried no data", op)))?;
        debug!(op, "GitHub GraphQL call succeeded");
        serde_json::from_value(data).map_err(undecodable)
    }

    async fn repository_ids(&self, repo: &RepoRef) -> ClientResult<RepositoryIds> {
        let data: RepositoryIdsData = self
            .execute(
                "repository_ids",
                REPOSITORY_IDS_QUERY,
                json!({ "owner": repo.owner, "name": repo.repo }),
            )
            .await?;
        data.repository
            .ok_or_else(|| ClientError::not_found(format!("repository {}", repo)))
    }
}

#[async_trait]
impl ProjectBoardApi for GraphClient {
    async fn create_project(
        &self,
        repo: &RepoRef,
        title: &str,
        description: Option<&str>,
    ) -> ClientResult<Project> {
        let ids = self.repository_ids(repo).await?;

        let mutation = format!(
            "mutation CreateProject($ownerId: ID!, $repositoryId: ID!, $title: String!) {{\n  \
             createProjectV2(input: {{\
             ownerId: $ownerId, repositoryId: $repositoryId, title: $title}}) {{\n    \
             projectV2 {{ {} }}\n  }}\n}}",
            PROJECT_FIELDS
        );
        let created: CreateProjectData = self
            .execute(
                "create_project",
                &mutation,
                json!({ "ownerId": ids.owner.id, "repositoryId": ids.id, "title": title }),
            )
            .await?;
        let mut project: Project = created.create_project_v2.project_v2.into();
        info!(project_id = %project.id, number = project.number, "Created project");

        if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
            let mutation = format!(
                "mutation DescribeProject($projectId: ID!, $description: String!) {{\n  \
                 updateProjectV2(input: {{\
                 projectId: $projectId, shortDescription: $description}}) {{\n    \
                 projectV2 {{ {} }}\n  }}\n}}",
                PROJECT_FIELDS
            );
            let updated: UpdateProjectData = self
                .execute(
                    "describe_project",
                    &mutation,
                    json!({ "projectId": project.id, "description": description }),
                )
                .await?;
            project = updated.update_project_v2.project_v2.into();
        }

        Ok(project)
    }

    async fn list_projects_for_repo(&self, repo: &RepoRef) -> ClientResult<Vec<Project>> {
        let data: ListProjectsData = self
            .execute(
                "list_projects",
                LIST_PROJECTS_QUERY,
                json!({ "owner": repo.owner, "name": repo.repo }),
            )
            .await?;
        let repository = data
            .repository
            .ok_or_else(|| ClientError::not_found(format!("repository {}", repo)))?;
        Ok(repository
            .projects_v2
            .nodes
            .into_iter()
            .flatten()
            .map(Project::from)
            .collect())
    }

    async fn add_project_item(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> ClientResult<BoardItem> {
        let data: AddItemData = self
            .execute(
                "add_project_item",
                ADD_ITEM_MUTATION,
                json!({ "projectId": project_id, "contentId": content_id }),
            )
            .await?;
        Ok(data.add_project_v2_item_by_id.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_node_conversion_drops_empty_description() {
        let node: ProjectNode = serde_json::from_value(json!({
            "id": "PVT_1",
            "number": 7,
            "title": "Roadmap",
            "shortDescription": "",
            "url": "https://github.com/orgs/acme/projects/7"
        }))
        .unwrap();
        let project = Project::from(node);
        assert_eq!(project.number, 7);
        assert_eq!(project.description, None);
    }

    #[test]
    fn test_errors_arrive_beside_nulled_mutation_field() {
        let parsed: GraphqlResponse = serde_json::from_value(json!({
            "data": { "createProjectV2": null },
            "errors": [{ "type": "FORBIDDEN", "message": "Resource not accessible by integration" }]
        }))
        .unwrap();
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].error_type.as_deref(), Some("FORBIDDEN"));

        // The typed payload would not decode; errors must be read first
        let typed: Result<CreateProjectData, _> = serde_json::from_value(parsed.data.unwrap());
        assert!(typed.is_err());
    }

    #[test]
    fn test_connection_skips_null_nodes() {
        let data: ListProjectsData = serde_json::from_value(json!({
            "repository": { "projectsV2": { "nodes": [
                null,
                { "id": "PVT_2", "number": 2, "title": "Q3", "shortDescription": null, "url": null }
            ] } }
        }))
        .unwrap();
        let nodes: Vec<_> = data
            .repository
            .unwrap()
            .projects_v2
            .nodes
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].title, "Q3");
    }
}
