//! Collection mapping between Postline groups and Postman Collection v2.1.

use postline_domain::{BodyKind, FormField, Group, Header, HttpMethod, Request};

use super::types::{
    COLLECTION_SCHEMA_V21, PostmanBody, PostmanCollection, PostmanFormDataParam, PostmanHeader,
    PostmanInfo, PostmanItem, PostmanRequest, PostmanUrl,
};
use super::warning::{ImportWarning, child_path};

/// Result of mapping a Postman collection into groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionImport {
    /// Collection name from `info.name`
    pub name: String,
    /// Imported groups, in document order
    pub groups: Vec<Group>,
    /// Warnings produced while mapping
    pub warnings: Vec<ImportWarning>,
}

impl CollectionImport {
    /// Total number of imported requests.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.groups.iter().map(|g| g.requests.len()).sum()
    }
}

/// Exports groups as a Postman collection.
///
/// Every group becomes one folder. Header `enabled` flags are not written,
/// so disabled headers export like enabled ones.
#[must_use]
pub fn to_postman(groups: &[Group], name: &str) -> PostmanCollection {
    PostmanCollection {
        info: PostmanInfo {
            postman_id: None,
            name: name.to_string(),
            schema: Some(COLLECTION_SCHEMA_V21.to_string()),
        },
        item: groups.iter().map(export_group).collect(),
    }
}

fn export_group(group: &Group) -> PostmanItem {
    PostmanItem {
        name: group.name.clone(),
        item: Some(group.requests.iter().map(export_request).collect()),
        request: None,
    }
}

fn export_request(request: &Request) -> PostmanItem {
    let header = request
        .headers
        .iter()
        .map(|h| PostmanHeader {
            key: h.key.clone(),
            value: h.value.clone(),
            disabled: false,
        })
        .collect();

    let body = match request.body_kind {
        BodyKind::Raw => PostmanBody {
            mode: "raw".to_string(),
            raw: Some(request.raw_body.clone()),
            formdata: Vec::new(),
        },
        BodyKind::FormData => PostmanBody {
            mode: "formdata".to_string(),
            raw: Some(request.raw_body.clone()),
            formdata: request
                .form_fields
                .iter()
                .map(|f| PostmanFormDataParam {
                    key: f.key.clone(),
                    value: Some(f.value.clone()),
                    param_type: Some("text".to_string()),
                    disabled: !f.enabled,
                })
                .collect(),
        },
    };

    PostmanItem {
        name: request.name.clone(),
        item: None,
        request: Some(PostmanRequest {
            method: request.method.as_str().to_string(),
            header,
            body: Some(body),
            url: PostmanUrl::raw(request.url.clone()),
        }),
    }
}

/// Maps a Postman collection into groups.
///
/// Top-level folders become groups. Requests inside nested folders are
/// flattened into their top-level group. Top-level requests outside any
/// folder are collected into one extra group named after the collection.
/// Items that are neither a folder nor a request are skipped.
#[must_use]
pub fn from_postman(collection: &PostmanCollection) -> CollectionImport {
    let mut warnings = Vec::new();
    let mut groups = Vec::new();
    let mut loose = Vec::new();

    for item in &collection.item {
        if let Some(children) = &item.item {
            let mut group = Group::new(item.name.clone());
            collect_requests(children, &item.name, &mut group.requests, &mut warnings);
            groups.push(group);
        } else if let Some(request) = &item.request {
            loose.push(import_request(&item.name, request, &item.name, &mut warnings));
        }
    }

    if !loose.is_empty() {
        let mut group = Group::new(collection.info.name.clone());
        group.requests = loose;
        groups.push(group);
    }

    CollectionImport {
        name: collection.info.name.clone(),
        groups,
        warnings,
    }
}

fn collect_requests(
    items: &[PostmanItem],
    parent: &str,
    requests: &mut Vec<Request>,
    warnings: &mut Vec<ImportWarning>,
) {
    for item in items {
        let path = child_path(parent, &item.name);
        if let Some(children) = &item.item {
            warnings.push(ImportWarning::info(
                &path,
                "Nested folder flattened into its parent group",
            ));
            collect_requests(children, &path, requests, warnings);
        } else if let Some(request) = &item.request {
            requests.push(import_request(&item.name, request, &path, warnings));
        }
    }
}

fn import_request(
    name: &str,
    request: &PostmanRequest,
    path: &str,
    warnings: &mut Vec<ImportWarning>,
) -> Request {
    let method = if request.method.trim().is_empty() {
        HttpMethod::Get
    } else {
        request.method.parse().unwrap_or_else(|_| {
            warnings.push(ImportWarning::warning(
                path,
                format!("Unsupported method {}, imported as GET", request.method),
            ));
            HttpMethod::Get
        })
    };

    let mut imported = Request::new(name, method, request.url.to_raw());
    imported.headers = request
        .header
        .iter()
        .map(|h| {
            if h.disabled {
                Header::disabled(h.key.clone(), h.value.clone())
            } else {
                Header::new(h.key.clone(), h.value.clone())
            }
        })
        .collect();

    if let Some(body) = &request.body {
        imported.raw_body = body.raw.clone().unwrap_or_default();
        match body.mode.as_str() {
            "formdata" => {
                imported.body_kind = BodyKind::FormData;
                imported.form_fields = import_form_fields(&body.formdata, path, warnings);
            }
            "" | "raw" => {}
            other => warnings.push(ImportWarning::warning(
                path,
                format!("Body mode {other} is not supported, imported as raw"),
            )),
        }
    }

    imported
}

fn import_form_fields(
    params: &[PostmanFormDataParam],
    path: &str,
    warnings: &mut Vec<ImportWarning>,
) -> Vec<FormField> {
    params
        .iter()
        .filter_map(|p| {
            if p.is_file() {
                warnings.push(ImportWarning::warning(
                    path,
                    format!("File field {} skipped", p.key),
                ));
                return None;
            }
            let value = p.value.clone().unwrap_or_default();
            Some(if p.disabled {
                FormField::disabled(p.key.clone(), value)
            } else {
                FormField::new(p.key.clone(), value)
            })
        })
        .collect()
}
