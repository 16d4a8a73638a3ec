use anyhow::{anyhow, Context};
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::info;

use aac_console_provider::{
    CreateParams, DeleteManyParams, DeleteParams, GetListParams, GetManyParams,
    GetManyReferenceParams, GetOneParams, InvokeParams, Pagination, RelationRef, RequestMeta,
    Sort, UpdateManyParams, UpdateParams,
};
use aac_console_shell::ConsoleShell;

use crate::Commands;

fn split_pair(raw: &str) -> anyhow::Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("empty key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Repeated keys collect into an array.
fn parse_filters(raw: &[String]) -> anyhow::Result<Map<String, Value>> {
    let mut filter = Map::new();
    for item in raw {
        let (key, value) = split_pair(item)?;
        match filter.remove(&key) {
            None => {
                filter.insert(key, Value::String(value));
            }
            Some(Value::Array(mut values)) => {
                values.push(Value::String(value));
                filter.insert(key, Value::Array(values));
            }
            Some(previous) => {
                filter.insert(key, json!([previous, value]));
            }
        }
    }
    Ok(filter)
}

fn parse_json(raw: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("invalid JSON: {}", raw))
}

fn list_params(
    meta: RequestMeta,
    page: u32,
    per_page: u32,
    sort: Option<Sort>,
    filter: Map<String, Value>,
) -> GetListParams {
    GetListParams {
        pagination: Some(Pagination::new(page, per_page)),
        sort,
        filter,
        meta,
    }
}

/// Console, realm selection, navigation links and mounted resources.
fn describe(shell: &ConsoleShell) -> Value {
    let resources: Vec<Value> = shell
        .mounted()
        .into_iter()
        .map(|r| {
            json!({
                "name": r.name,
                "icon": r.icon,
                "realmScoped": r.realm_scoped,
                "views": {
                    "list": r.views.list,
                    "edit": r.views.edit,
                    "create": r.views.create,
                    "show": r.views.show,
                },
            })
        })
        .collect();
    let links = shell.links();
    json!({
        "console": shell.kind().to_string(),
        "realm": shell.root().selected(),
        "links": links,
        "switchTo": links.switch_target(shell.kind()),
        "resources": resources,
    })
}

pub async fn run(shell: &ConsoleShell, command: Commands) -> anyhow::Result<Value> {
    let provider = shell.provider();

    let output = match command {
        Commands::Resources => describe(shell),

        Commands::Realms => serde_json::to_value(shell.load_realms().await?)?,

        Commands::List {
            resource,
            page,
            per_page,
            sort,
            filters,
        } => {
            let meta = shell.request_meta(&resource)?;
            let params = list_params(meta, page, per_page, sort, parse_filters(&filters)?);
            serde_json::to_value(provider.get_list(&resource, params).await?)?
        }

        Commands::Get {
            resource,
            id,
            flatten,
        } => {
            let meta = shell.request_meta(&resource)?.with_flatten(flatten);
            let result = provider.get_one(&resource, GetOneParams { id, meta }).await?;
            let label = shell.resource(&resource)?.record_representation(&result.data);
            info!("Loaded {} '{}'", resource, label);
            serde_json::to_value(result)?
        }

        Commands::GetMany {
            resource,
            ids,
            flatten,
        } => {
            let meta = shell.request_meta(&resource)?.with_flatten(flatten);
            let ids = ids.into_iter().map(RelationRef::from).collect();
            serde_json::to_value(provider.get_many(&resource, GetManyParams { ids, meta }).await?)?
        }

        Commands::References {
            resource,
            target,
            id,
            page,
            per_page,
            sort,
        } => {
            let meta = shell.request_meta(&resource)?;
            let params = GetManyReferenceParams {
                target,
                id,
                list: list_params(meta, page, per_page, sort, Map::new()),
            };
            serde_json::to_value(provider.get_many_reference(&resource, params).await?)?
        }

        Commands::Create { resource, data } => {
            let meta = shell.request_meta(&resource)?;
            let params = CreateParams {
                data: parse_json(&data)?,
                meta,
            };
            serde_json::to_value(provider.create(&resource, params).await?)?
        }

        Commands::Import {
            resource,
            file,
            reset,
        } => {
            let yaml = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let meta = shell.request_meta(&resource)?.as_import(reset);
            let params = CreateParams {
                data: Value::String(yaml),
                meta,
            };
            serde_json::to_value(provider.create(&resource, params).await?)?
        }

        Commands::Update {
            resource,
            id,
            data,
            flatten,
        } => {
            let meta = shell.request_meta(&resource)?.with_flatten(flatten);
            let params = UpdateParams {
                id,
                data: parse_json(&data)?,
                previous_data: None,
                meta,
            };
            serde_json::to_value(provider.update(&resource, params).await?)?
        }

        Commands::UpdateMany {
            resource,
            ids,
            data,
        } => {
            let meta = shell.request_meta(&resource)?;
            let params = UpdateManyParams {
                ids,
                data: parse_json(&data)?,
                meta,
            };
            serde_json::to_value(provider.update_many(&resource, params).await?)?
        }

        Commands::Delete { resource, id } => {
            let meta = shell.request_meta(&resource)?;
            let params = DeleteParams {
                id,
                previous_data: None,
                meta,
            };
            serde_json::to_value(provider.delete(&resource, params).await?)?
        }

        Commands::DeleteMany { resource, ids } => {
            let meta = shell.request_meta(&resource)?;
            serde_json::to_value(
                provider
                    .delete_many(&resource, DeleteManyParams { ids, meta })
                    .await?,
            )?
        }

        Commands::Invoke {
            path,
            method,
            query,
            body,
        } => {
            let method = method
                .map(|m| Method::from_bytes(m.to_ascii_uppercase().as_bytes()))
                .transpose()
                .context("invalid HTTP method")?;
            let params = InvokeParams {
                path,
                method,
                query: query
                    .iter()
                    .map(|q| split_pair(q))
                    .collect::<anyhow::Result<Vec<_>>>()?,
                body: body.as_deref().map(parse_json).transpose()?,
            };
            provider.invoke(params).await?
        }

        Commands::Props => provider.app_props().await?,

        Commands::Authorities => provider.my_authorities().await?,
    };

    Ok(output)
}
