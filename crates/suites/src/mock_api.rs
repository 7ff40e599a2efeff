//! In-process fakes of the APIs under test.
//!
//! Both fakes run on a `wiremock` server with a stateful responder, so a
//! user registered by one request can log in with the next. State lives
//! as long as the fake.
//!
//! ```ignore
//! let api = UserApiMock::start(&AdminCredentials::default()).await;
//! let users = UserService::new(client, api.base_url());
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use restcheck_domain::{
    models::{Address, FullUser, Geolocation, JwtAuthData, Name, PasswordChange, StoreUser},
    settings::AdminCredentials,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate, matchers::any};

/// Path prefix of the user API.
pub const USER_API_PREFIX: &str = "/api";

/// Accounts seeded next to the admin; like the admin they cannot be
/// changed or deleted.
pub const BASE_USERS: &[(&str, &str)] = &[("demo", "demo_pass"), ("guest", "guest_pass")];

/// Number of users the store fake starts with.
pub const STORE_SEED_USERS: i64 = 10;

/// Known store login.
pub const STORE_LOGIN: (&str, &str) = ("johnd", "m38rmF$");

fn info(status: u16, outcome: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .set_body_json(json!({"info": {"status": outcome, "message": message}}))
}

fn success(status: u16, message: &str) -> ResponseTemplate {
    info(status, "success", message)
}

fn fail(status: u16, message: &str) -> ResponseTemplate {
    info(status, "fail", message)
}

fn parse_body<T: DeserializeOwned>(request: &Request) -> Option<T> {
    serde_json::from_slice(&request.body).ok()
}

fn bearer(request: &Request) -> Option<&str> {
    request
        .headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[derive(Debug, Default)]
struct UserDirectory {
    users: BTreeMap<String, FullUser>,
    base: HashSet<String>,
    tokens: HashMap<String, String>,
    next_id: i64,
    issued: u64,
}

impl UserDirectory {
    fn seeded(admin: &AdminCredentials) -> Self {
        let mut directory = Self {
            next_id: 1,
            ..Self::default()
        };
        directory.insert(FullUser::new(&admin.login, &admin.password));
        for (login, pass) in BASE_USERS {
            directory.insert(FullUser::new(*login, *pass));
        }
        directory.base = directory.users.keys().cloned().collect();
        directory
    }

    fn insert(&mut self, mut user: FullUser) {
        user.id = Some(self.next_id);
        self.next_id += 1;
        self.users.insert(user.login.clone(), user);
    }

    fn is_base(&self, login: &str) -> bool {
        self.base.contains(login)
    }

    fn login_of(&self, request: &Request) -> Option<String> {
        bearer(request).and_then(|token| self.tokens.get(token).cloned())
    }

    fn signup(&mut self, request: &Request) -> ResponseTemplate {
        let Some(user) = parse_body::<FullUser>(request) else {
            return fail(400, "Missing login or password");
        };
        if user.login.is_empty() || user.pass.as_deref().is_none_or(str::is_empty) {
            return fail(400, "Missing login or password");
        }
        if self.users.contains_key(&user.login) {
            return fail(400, "Login already exist");
        }
        self.insert(user);
        success(201, "User created")
    }

    fn login(&mut self, request: &Request) -> ResponseTemplate {
        let Some(credentials) = parse_body::<JwtAuthData>(request) else {
            return fail(400, "Missing login or password");
        };
        let matches = self
            .users
            .get(&credentials.username)
            .is_some_and(|u| u.pass.as_deref() == Some(credentials.password.as_str()));
        if !matches {
            return fail(401, "Invalid login or password");
        }

        self.issued += 1;
        let token = format!("jwt.{}.{}", credentials.username, self.issued);
        self.tokens.insert(token.clone(), credentials.username);
        ResponseTemplate::new(200).set_body_json(json!({"token": token}))
    }

    fn user_info(&self, request: &Request) -> ResponseTemplate {
        match self.login_of(request).and_then(|login| self.users.get(&login)) {
            Some(user) => ResponseTemplate::new(200).set_body_json(user),
            None => fail(401, "Unauthorized"),
        }
    }

    fn update_pass(&mut self, request: &Request) -> ResponseTemplate {
        let Some(login) = self.login_of(request) else {
            return fail(401, "Unauthorized");
        };
        if self.is_base(&login) {
            return fail(400, "Cant update base users");
        }
        let Some(change) = parse_body::<PasswordChange>(request) else {
            return fail(400, "Missing password");
        };
        if let Some(user) = self.users.get_mut(&login) {
            user.pass = Some(change.password);
        }
        success(200, "User password successfully changed")
    }

    fn delete(&mut self, request: &Request) -> ResponseTemplate {
        let Some(login) = self.login_of(request) else {
            return fail(401, "Unauthorized");
        };
        if self.is_base(&login) {
            return fail(400, "Cant delete base users");
        }
        self.users.remove(&login);
        self.tokens.retain(|_, owner| *owner != login);
        success(200, "User successfully deleted")
    }

    fn logins(&self) -> ResponseTemplate {
        let logins: Vec<&String> = self.users.keys().collect();
        ResponseTemplate::new(200).set_body_json(logins)
    }
}

struct UserApi {
    directory: Arc<Mutex<UserDirectory>>,
}

impl Respond for UserApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut directory = self
            .directory
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let route = request.url.path().strip_prefix(USER_API_PREFIX);

        match (request.method.as_str(), route) {
            ("POST", Some("/signup")) => directory.signup(request),
            ("POST", Some("/login")) => directory.login(request),
            ("GET", Some("/user")) => directory.user_info(request),
            ("PUT", Some("/user")) => directory.update_pass(request),
            ("DELETE", Some("/user")) => directory.delete(request),
            ("GET", Some("/users")) => directory.logins(),
            _ => ResponseTemplate::new(404),
        }
    }
}

/// Fake user-management API.
pub struct UserApiMock {
    server: MockServer,
    directory: Arc<Mutex<UserDirectory>>,
}

impl UserApiMock {
    /// Starts the fake with the admin and base accounts registered.
    pub async fn start(admin: &AdminCredentials) -> Self {
        let server = MockServer::start().await;
        let directory = Arc::new(Mutex::new(UserDirectory::seeded(admin)));

        Mock::given(any())
            .respond_with(UserApi {
                directory: Arc::clone(&directory),
            })
            .mount(&server)
            .await;

        Self { server, directory }
    }

    /// Base URL to hand to `UserService`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}{USER_API_PREFIX}", self.server.uri())
    }

    /// Number of registered users, base accounts included.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.directory
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .users
            .len()
    }
}

#[derive(Debug)]
struct StoreCatalog {
    users: BTreeMap<i64, StoreUser>,
    next_id: i64,
}

impl StoreCatalog {
    fn seeded() -> Self {
        let users: BTreeMap<i64, StoreUser> = (1..=STORE_SEED_USERS)
            .map(|id| (id, Self::seed_user(id)))
            .collect();
        Self {
            users,
            next_id: STORE_SEED_USERS + 1,
        }
    }

    fn seed_user(id: i64) -> StoreUser {
        let (username, password) = if id == 1 {
            (STORE_LOGIN.0.to_string(), STORE_LOGIN.1.to_string())
        } else {
            (format!("customer{id}"), format!("pass{id}word"))
        };
        StoreUser {
            id,
            email: format!("{username}@gmail.com"),
            username,
            password,
            name: Name::new(format!("first{id}"), format!("last{id}")),
            address: Address {
                city: "kilcoole".to_string(),
                street: "new road".to_string(),
                number: 7000 + id,
                zipcode: format!("{:05}-{:04}", 12000 + id, 3800 + id),
                geolocation: Geolocation::new("-37.3159", "81.1496"),
            },
            phone: format!("1-570-236-{:04}", 7000 + id),
        }
    }

    fn list(&self, request: &Request) -> ResponseTemplate {
        let mut limit = None;
        let mut descending = false;
        for (key, value) in request.url.query_pairs() {
            match key.as_ref() {
                "limit" => limit = value.parse::<usize>().ok(),
                "sort" => descending = value == "desc",
                _ => {}
            }
        }

        let mut users: Vec<&StoreUser> = self.users.values().collect();
        if descending {
            users.reverse();
        }
        // Out-of-range limits are ignored and the full list is returned.
        if let Some(limit) = limit.filter(|l| (1..=users.len()).contains(l)) {
            users.truncate(limit);
        }
        ResponseTemplate::new(200).set_body_json(users)
    }

    fn get(&self, id: i64) -> ResponseTemplate {
        match self.users.get(&id) {
            Some(user) => ResponseTemplate::new(200).set_body_json(user),
            None => ResponseTemplate::new(404).set_body_json(json!({"message": "user not found"})),
        }
    }

    fn add(&mut self, request: &Request) -> ResponseTemplate {
        let Some(mut user) = parse_body::<StoreUser>(request) else {
            return ResponseTemplate::new(400).set_body_json(json!({"message": "invalid user"}));
        };
        user.id = self.next_id;
        self.next_id += 1;
        let body = json!({"id": user.id});
        self.users.insert(user.id, user);
        ResponseTemplate::new(200).set_body_json(body)
    }

    fn update(&mut self, id: i64, request: &Request) -> ResponseTemplate {
        let Some(mut user) = parse_body::<StoreUser>(request) else {
            return ResponseTemplate::new(400).set_body_json(json!({"message": "invalid user"}));
        };
        user.id = id;
        self.users.insert(id, user.clone());
        ResponseTemplate::new(200).set_body_json(user)
    }

    fn delete(&mut self, id: i64) -> ResponseTemplate {
        match self.users.remove(&id) {
            Some(user) => ResponseTemplate::new(200).set_body_json(user),
            None => ResponseTemplate::new(200).set_body_json(Value::Null),
        }
    }

    fn login(&self, request: &Request) -> ResponseTemplate {
        let credentials = parse_body::<Value>(request).unwrap_or_default();
        let username = credentials["username"].as_str().unwrap_or_default();
        let password = credentials["password"].as_str().unwrap_or_default();

        let known = self
            .users
            .values()
            .any(|u| u.username == username && u.password == password);
        if known {
            ResponseTemplate::new(200).set_body_json(json!({"token": format!("store.{username}")}))
        } else {
            ResponseTemplate::new(401).set_body_string("username or password is incorrect")
        }
    }
}

struct StoreApi {
    catalog: Arc<Mutex<StoreCatalog>>,
}

impl Respond for StoreApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut catalog = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        let segments: Vec<&str> = request
            .url
            .path()
            .trim_matches('/')
            .split('/')
            .collect();
        let id = segments.get(1).and_then(|s| s.parse::<i64>().ok());

        match (request.method.as_str(), segments.as_slice(), id) {
            ("GET", ["users"], _) => catalog.list(request),
            ("POST", ["users"], _) => catalog.add(request),
            ("GET", ["users", _], Some(id)) => catalog.get(id),
            ("PUT", ["users", _], Some(id)) => catalog.update(id, request),
            ("DELETE", ["users", _], Some(id)) => catalog.delete(id),
            ("POST", ["auth", "login"], _) => catalog.login(request),
            _ => ResponseTemplate::new(404),
        }
    }
}

/// Fake store API with ten seeded customers.
pub struct StoreApiMock {
    server: MockServer,
}

impl StoreApiMock {
    /// Starts the fake.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(StoreApi {
                catalog: Arc::new(Mutex::new(StoreCatalog::seeded())),
            })
            .mount(&server)
            .await;
        Self { server }
    }

    /// Base URL to hand to `StoreService`.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.server.uri()
    }
}
