//! In-memory ports for service tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use setlistd_core::{
    AuthSession, CatalogPage, CatalogQuery, Comment, ConcertList, ConcertListRepository,
    DomainError, Event, EventCatalog, EventListing, EventPage, EventQuery, EventRepository,
    FollowCounts, FollowRepository, Identity, IdentityProvider, ObjectStorage, Performer, Post,
    PostRepository, RatingSummary, RepoResult, Review, ReviewRepository, User, UserRepository,
    Venue,
};
use uuid::Uuid;

use super::context::{ServiceContext, StorageBuckets};

/// Catalog listing for `performer`, starting `days_from_now` days from now
pub fn listing(seatgeek_id: i64, performer: &str, days_from_now: i64) -> EventListing {
    EventListing {
        seatgeek_id,
        title: format!("{performer} live"),
        datetime_local: (Utc::now() + Duration::days(days_from_now)).naive_utc(),
        datetime_utc: None,
        url: None,
        venue: Some(Venue {
            city: Some("Austin".to_string()),
            ..Default::default()
        }),
        performers: vec![Performer {
            name: performer.to_string(),
            primary: true,
            ..Default::default()
        }],
        stats: None,
        taxonomies: Vec::new(),
        event_type: Some("concert".to_string()),
        status: None,
    }
}

/// Service context wired to in-memory ports, with handles for assertions
pub struct TestContext {
    pub ctx: ServiceContext,
    pub users: Arc<MemUsers>,
    pub follows: Arc<MemFollows>,
    pub events: Arc<MemEvents>,
    pub reviews: Arc<MemReviews>,
    pub lists: Arc<MemLists>,
    pub posts: Arc<MemPosts>,
    pub identity: Arc<FakeIdentity>,
    pub storage: Arc<MemStorage>,
    pub catalog: Arc<FakeCatalog>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(MemUsers::default());
        let follows = Arc::new(MemFollows::new(users.clone()));
        let events = Arc::new(MemEvents::default());
        let reviews = Arc::new(MemReviews::default());
        let lists = Arc::new(MemLists::new(events.clone()));
        let posts = Arc::new(MemPosts::default());
        let identity = Arc::new(FakeIdentity::default());
        let storage = Arc::new(MemStorage::default());
        let catalog = Arc::new(FakeCatalog::default());

        let ctx = ServiceContext::new(
            users.clone(),
            follows.clone(),
            events.clone(),
            reviews.clone(),
            lists.clone(),
            posts.clone(),
            identity.clone(),
            storage.clone(),
            catalog.clone(),
            StorageBuckets::default(),
        );

        Self {
            ctx,
            users,
            follows,
            events,
            reviews,
            lists,
            posts,
            identity,
            storage,
            catalog,
        }
    }

    pub fn add_user(&self, id: &str, username: &str) -> User {
        let user = User::new(
            id.to_string(),
            format!("{username}@example.com"),
            username.to_string(),
        );
        self.users.insert(user.clone());
        user
    }

    pub fn save_event(&self, listing: EventListing) -> Event {
        self.events.insert(Event::new(listing))
    }
}

// ============================================================================
// Repositories
// ============================================================================

#[derive(Default)]
pub struct MemUsers {
    users: Mutex<Vec<User>>,
}

impl MemUsers {
    /// Insert or replace by id
    pub fn insert(&self, user: User) {
        let mut users = self.users.lock().unwrap();
        users.retain(|u| u.id != user.id);
        users.push(user);
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for MemUsers {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn search_by_username(&self, query: &str, limit: i64) -> RepoResult<Vec<User>> {
        let needle = query.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.username.to_lowercase().contains(&needle))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        if users.iter().any(|u| u.username == user.username || u.id == user.id) {
            return Err(DomainError::UsernameTaken(user.username.clone()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        self.insert(user.clone());
        Ok(())
    }

    async fn adjust_posts_count(&self, id: &str, delta: i32) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
        user.posts_count = (user.posts_count + delta).max(0);
        Ok(())
    }
}

pub struct MemFollows {
    users: Arc<MemUsers>,
    edges: Mutex<Vec<(String, String)>>,
}

impl MemFollows {
    fn new(users: Arc<MemUsers>) -> Self {
        Self {
            users,
            edges: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.edges.lock().unwrap().len()
    }

    fn collect(&self, pick: impl Fn(&(String, String)) -> Option<String>) -> Vec<User> {
        let ids: Vec<String> = self.edges.lock().unwrap().iter().filter_map(pick).collect();
        ids.iter().filter_map(|id| self.users.get(id)).collect()
    }
}

#[async_trait]
impl FollowRepository for MemFollows {
    async fn is_following(&self, follower_id: &str, followee_id: &str) -> RepoResult<bool> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .any(|(a, b)| a == follower_id && b == followee_id))
    }

    async fn follow(&self, follower_id: &str, followee_id: &str) -> RepoResult<()> {
        if self.is_following(follower_id, followee_id).await? {
            return Err(DomainError::AlreadyFollowing);
        }
        self.edges
            .lock()
            .unwrap()
            .push((follower_id.to_string(), followee_id.to_string()));
        Ok(())
    }

    async fn unfollow(&self, follower_id: &str, followee_id: &str) -> RepoResult<bool> {
        let mut edges = self.edges.lock().unwrap();
        let before = edges.len();
        edges.retain(|(a, b)| !(a == follower_id && b == followee_id));
        Ok(edges.len() != before)
    }

    async fn followers(&self, user_id: &str) -> RepoResult<Vec<User>> {
        Ok(self.collect(|(a, b)| (b == user_id).then(|| a.clone())))
    }

    async fn following(&self, user_id: &str) -> RepoResult<Vec<User>> {
        Ok(self.collect(|(a, b)| (a == user_id).then(|| b.clone())))
    }

    async fn following_ids(&self, user_id: &str) -> RepoResult<Vec<String>> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(a, _)| a == user_id)
            .map(|(_, b)| b.clone())
            .collect())
    }

    async fn counts(&self, user_id: &str) -> RepoResult<FollowCounts> {
        let edges = self.edges.lock().unwrap();
        Ok(FollowCounts {
            followers: edges.iter().filter(|(_, b)| b == user_id).count() as i64,
            following: edges.iter().filter(|(a, _)| a == user_id).count() as i64,
        })
    }
}

#[derive(Default)]
pub struct MemEvents {
    events: Mutex<Vec<Event>>,
}

impl MemEvents {
    pub fn insert(&self, event: Event) -> Event {
        self.events.lock().unwrap().push(event.clone());
        event
    }

    pub fn by_seatgeek_id(&self, seatgeek_id: i64) -> Option<Event> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.seatgeek_id() == seatgeek_id)
            .cloned()
    }

    pub fn get(&self, id: Uuid) -> Option<Event> {
        self.events.lock().unwrap().iter().find(|e| e.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

#[async_trait]
impl EventRepository for MemEvents {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Event>> {
        Ok(self.get(id))
    }

    async fn find_by_seatgeek_id(&self, seatgeek_id: i64) -> RepoResult<Option<Event>> {
        Ok(self.by_seatgeek_id(seatgeek_id))
    }

    async fn upsert(&self, listing: &EventListing) -> RepoResult<Event> {
        let mut events = self.events.lock().unwrap();
        if let Some(existing) = events
            .iter_mut()
            .find(|e| e.seatgeek_id() == listing.seatgeek_id)
        {
            existing.listing = listing.clone();
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }
        let event = Event::new(listing.clone());
        events.push(event.clone());
        Ok(event)
    }

    async fn search(&self, query: &EventQuery) -> RepoResult<EventPage> {
        let text = query.text.as_deref().map(str::to_lowercase);
        let city = query.city.as_deref().map(str::to_lowercase);

        let mut matches: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                text.as_deref().map_or(true, |t| {
                    e.listing.title.to_lowercase().contains(t) || e.has_performer(t)
                })
            })
            .filter(|e| {
                city.as_deref().map_or(true, |c| {
                    e.listing
                        .venue
                        .as_ref()
                        .and_then(|v| v.city.as_deref())
                        .is_some_and(|v| v.to_lowercase() == c)
                })
            })
            .filter(|e| query.from.map_or(true, |from| e.listing.datetime_local >= from))
            .filter(|e| query.to.map_or(true, |to| e.listing.datetime_local <= to))
            .cloned()
            .collect();
        matches.sort_by_key(|e| e.listing.datetime_local);

        let total = matches.len() as i64;
        let events = matches
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();
        Ok(EventPage { events, total })
    }

    async fn find_by_performer(&self, name: &str) -> RepoResult<Vec<Event>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.has_performer(name))
            .cloned()
            .collect())
    }

    async fn update_rating(&self, seatgeek_id: i64, summary: &RatingSummary) -> RepoResult<()> {
        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.seatgeek_id() == seatgeek_id)
            .ok_or_else(|| DomainError::EventNotFound(seatgeek_id.to_string()))?;
        event.apply_rating(summary);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.id != id);
        if events.len() == before {
            return Err(DomainError::EventNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemReviews {
    reviews: Mutex<Vec<Review>>,
}

#[async_trait]
impl ReviewRepository for MemReviews {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Review>> {
        Ok(self.reviews.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_event(&self, event_id: i64) -> RepoResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn find_by_event_and_user(
        &self,
        event_id: i64,
        user_id: &str,
    ) -> RepoResult<Option<Review>> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.event_id == event_id && r.user_id == user_id)
            .cloned())
    }

    async fn find_by_events(&self, event_ids: &[i64]) -> RepoResult<Vec<Review>> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| event_ids.contains(&r.event_id))
            .cloned()
            .collect())
    }

    async fn create(&self, review: &Review) -> RepoResult<()> {
        let mut reviews = self.reviews.lock().unwrap();
        if reviews
            .iter()
            .any(|r| r.event_id == review.event_id && r.user_id == review.user_id)
        {
            return Err(DomainError::AlreadyReviewed);
        }
        reviews.push(review.clone());
        Ok(())
    }

    async fn update(&self, review: &Review) -> RepoResult<()> {
        let mut reviews = self.reviews.lock().unwrap();
        let slot = reviews
            .iter_mut()
            .find(|r| r.id == review.id)
            .ok_or(DomainError::ReviewNotFound(review.id))?;
        *slot = review.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut reviews = self.reviews.lock().unwrap();
        let before = reviews.len();
        reviews.retain(|r| r.id != id);
        if reviews.len() == before {
            return Err(DomainError::ReviewNotFound(id));
        }
        Ok(())
    }
}

pub struct MemLists {
    events: Arc<MemEvents>,
    entries: Mutex<Vec<(String, ConcertList, Uuid)>>,
}

impl MemLists {
    fn new(events: Arc<MemEvents>) -> Self {
        Self {
            events,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Add an entry without any rule checks
    pub fn put(&self, user_id: &str, list: ConcertList, event_id: Uuid) {
        self.entries
            .lock()
            .unwrap()
            .push((user_id.to_string(), list, event_id));
    }
}

#[async_trait]
impl ConcertListRepository for MemLists {
    async fn contains(&self, user_id: &str, list: ConcertList, event_id: Uuid) -> RepoResult<bool> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .any(|(u, l, e)| u == user_id && *l == list && *e == event_id))
    }

    async fn add(&self, user_id: &str, list: ConcertList, event_id: Uuid) -> RepoResult<()> {
        if self.contains(user_id, list, event_id).await? {
            return Err(DomainError::AlreadyInList(list));
        }
        self.put(user_id, list, event_id);
        Ok(())
    }

    async fn remove(&self, user_id: &str, list: ConcertList, event_id: Uuid) -> RepoResult<bool> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|(u, l, e)| !(u == user_id && *l == list && *e == event_id));
        Ok(entries.len() != before)
    }

    async fn events(&self, user_id: &str, list: ConcertList) -> RepoResult<Vec<Event>> {
        let ids: Vec<Uuid> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, l, _)| u == user_id && *l == list)
            .map(|(_, _, e)| *e)
            .collect();
        Ok(ids.into_iter().filter_map(|id| self.events.get(id)).collect())
    }
}

#[derive(Default)]
pub struct MemPosts {
    posts: Mutex<Vec<Post>>,
}

impl MemPosts {
    fn with_post<T>(&self, id: Uuid, f: impl FnOnce(&mut Post) -> T) -> RepoResult<T> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::PostNotFound(id))?;
        Ok(f(post))
    }
}

#[async_trait]
impl PostRepository for MemPosts {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_authors(
        &self,
        user_ids: &[String],
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Post>> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| user_ids.contains(&p.user_id))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn create(&self, post: &Post) -> RepoResult<()> {
        self.posts.lock().unwrap().push(post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> RepoResult<()> {
        self.with_post(post.id, |stored| {
            stored.content = post.content.clone();
            stored.updated_at = post.updated_at;
        })
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(DomainError::PostNotFound(id));
        }
        Ok(())
    }

    async fn add_like(&self, post_id: Uuid, user_id: &str) -> RepoResult<()> {
        self.with_post(post_id, |post| {
            if !post.is_liked_by(user_id) {
                post.likes.push(user_id.to_string());
            }
        })
    }

    async fn remove_like(&self, post_id: Uuid, user_id: &str) -> RepoResult<()> {
        self.with_post(post_id, |post| post.likes.retain(|id| id != user_id))
    }

    async fn count_likes(&self, post_id: Uuid) -> RepoResult<i64> {
        self.with_post(post_id, |post| post.likes_count() as i64)
    }

    async fn add_comment(&self, comment: &Comment) -> RepoResult<()> {
        self.with_post(comment.post_id, |post| post.comments.push(comment.clone()))
    }

    async fn delete_comment(&self, comment_id: Uuid) -> RepoResult<()> {
        let mut posts = self.posts.lock().unwrap();
        for post in posts.iter_mut() {
            let before = post.comments.len();
            post.comments.retain(|c| c.id != comment_id);
            if post.comments.len() != before {
                return Ok(());
            }
        }
        Err(DomainError::CommentNotFound(comment_id))
    }
}

// ============================================================================
// External ports
// ============================================================================

#[derive(Default)]
pub struct FakeIdentity {
    tokens: Mutex<HashMap<String, Identity>>,
    accounts: Mutex<HashMap<String, (String, Identity)>>,
}

impl FakeIdentity {
    /// Make `token` resolve to `identity`
    pub fn register(&self, token: &str, identity: Identity) {
        self.tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), identity);
    }

    fn session(&self, identity: Identity) -> AuthSession {
        let token = format!("token-{}", identity.id);
        self.register(&token, identity.clone());
        AuthSession {
            access_token: Some(token),
            refresh_token: None,
            expires_in: Some(3600),
            identity,
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn verify(&self, token: &str) -> RepoResult<Option<Identity>> {
        Ok(self.tokens.lock().unwrap().get(token).cloned())
    }

    async fn sign_up(&self, email: &str, password: &str) -> RepoResult<AuthSession> {
        let identity = {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(DomainError::EmailAlreadyExists);
            }
            let identity = Identity {
                id: Uuid::new_v4().to_string(),
                email: email.to_string(),
                username: None,
            };
            accounts.insert(email.to_string(), (password.to_string(), identity.clone()));
            identity
        };
        Ok(self.session(identity))
    }

    async fn sign_in(&self, email: &str, password: &str) -> RepoResult<Option<AuthSession>> {
        let identity = self
            .accounts
            .lock()
            .unwrap()
            .get(email)
            .filter(|(stored, _)| stored == password)
            .map(|(_, identity)| identity.clone());
        Ok(identity.map(|identity| self.session(identity)))
    }

    async fn sign_out(&self, token: &str) -> RepoResult<()> {
        self.tokens.lock().unwrap().remove(token);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemStorage {
    objects: Mutex<Vec<(String, String)>>,
}

impl MemStorage {
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for MemStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> RepoResult<String> {
        self.objects
            .lock()
            .unwrap()
            .push((bucket.to_string(), key.to_string()));
        Ok(format!(
            "https://storage.test/storage/v1/object/public/{bucket}/{key}"
        ))
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    listings: Mutex<Vec<EventListing>>,
    failing: Mutex<bool>,
}

impl FakeCatalog {
    pub fn push(&self, listing: EventListing) {
        self.listings.lock().unwrap().push(listing);
    }

    /// Make every search fail like an unreachable catalog
    pub fn fail(&self) {
        *self.failing.lock().unwrap() = true;
    }
}

#[async_trait]
impl EventCatalog for FakeCatalog {
    async fn search(&self, query: &CatalogQuery) -> RepoResult<CatalogPage> {
        if *self.failing.lock().unwrap() {
            return Err(DomainError::ExternalService(
                "Failed to fetch events from SeatGeek".to_string(),
            ));
        }
        let events = self.listings.lock().unwrap().clone();
        Ok(CatalogPage {
            total: Some(events.len() as i64),
            events,
            page: query.page,
            per_page: query.per_page,
        })
    }
}
