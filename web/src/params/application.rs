use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::{IntoQueryFilterMap, IntoUpdateMap, QueryFilterMap, UpdateMap};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UpdateParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub is_active: Option<bool>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(name) = self.name {
            update_map.insert(
                "name".to_string(),
                Some(Value::String(Some(Box::new(name)))),
            );
        }
        if let Some(description) = self.description {
            update_map.insert(
                "description".to_string(),
                Some(Value::String(Some(Box::new(description)))),
            );
        }
        if let Some(url) = self.url {
            update_map.insert("url".to_string(), Some(Value::String(Some(Box::new(url)))));
        }
        if let Some(is_active) = self.is_active {
            update_map.insert("is_active".to_string(), Some(Value::Bool(Some(is_active))));
        }
        update_map
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FilterParams {
    pub name: Option<String>,
}

impl FilterParams {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

impl IntoQueryFilterMap for FilterParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        if let Some(name) = self.name {
            query_filter_map.insert(
                "name".to_string(),
                Some(Value::String(Some(Box::new(name)))),
            );
        }
        query_filter_map
    }
}
