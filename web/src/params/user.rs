use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use domain::{IntoQueryFilterMap, IntoUpdateMap, QueryFilterMap, UpdateMap};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct UpdateParams {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub is_active: Option<bool>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        insert_string(&mut update_map, "username", self.username);
        insert_string(&mut update_map, "email", self.email);
        insert_string(&mut update_map, "first_name", self.first_name);
        insert_string(&mut update_map, "last_name", self.last_name);
        insert_string(&mut update_map, "phone_number", self.phone_number);
        insert_string(&mut update_map, "address", self.address);
        insert_string(&mut update_map, "city", self.city);
        insert_string(&mut update_map, "state", self.state);
        insert_string(&mut update_map, "country", self.country);
        insert_string(&mut update_map, "zip_code", self.zip_code);
        if let Some(is_active) = self.is_active {
            update_map.insert("is_active".to_string(), Some(Value::Bool(Some(is_active))));
        }
        update_map
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FilterParams {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl FilterParams {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

impl IntoQueryFilterMap for FilterParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        if let Some(username) = self.username {
            query_filter_map.insert(
                "username".to_string(),
                Some(Value::String(Some(Box::new(username)))),
            );
        }
        if let Some(email) = self.email {
            query_filter_map.insert(
                "email".to_string(),
                Some(Value::String(Some(Box::new(email)))),
            );
        }
        query_filter_map
    }
}

fn insert_string(update_map: &mut UpdateMap, key: &str, value: Option<String>) {
    if let Some(value) = value {
        update_map.insert(key.to_string(), Some(Value::String(Some(Box::new(value)))));
    }
}
