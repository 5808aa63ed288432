use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "church-access-token";
const REFRESH_TOKEN_KEY: &str = "church-refresh-token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn save_tokens(access_token: &str, refresh_token: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(ACCESS_TOKEN_KEY, access_token);
        let _ = storage.set_item(REFRESH_TOKEN_KEY, refresh_token);
    }
}

pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

pub fn get_refresh_token() -> Option<String> {
    get_local_storage()?
        .get_item(REFRESH_TOKEN_KEY)
        .ok()?
        .filter(|t| !t.is_empty())
}

pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}
