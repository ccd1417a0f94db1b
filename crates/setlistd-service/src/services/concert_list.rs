//! Concert list service
//!
//! Attended, wishlist and favorites collections. Only upcoming events may be
//! wishlisted.

use chrono::Utc;
use setlistd_core::{ConcertList, DomainError, Event, User};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{EventResponse, MessageResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::user::UserService;

/// Concert list service
pub struct ConcertListService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConcertListService<'a> {
    /// Create a new ConcertListService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn add(
        &self,
        user: &User,
        list: ConcertList,
        event_id: Uuid,
    ) -> ServiceResult<MessageResponse> {
        let event = self
            .ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", event_id.to_string()))?;

        if list.requires_upcoming() && !event.is_upcoming(Utc::now().naive_utc()) {
            return Err(DomainError::PastEventForWishlist.into());
        }

        if self
            .ctx
            .concert_list_repo()
            .contains(&user.id, list, event_id)
            .await?
        {
            return Err(DomainError::AlreadyInList(list).into());
        }
        self.ctx
            .concert_list_repo()
            .add(&user.id, list, event_id)
            .await?;

        info!(list = %list, event_id = %event_id, "Concert added");
        Ok(MessageResponse::new(format!("Concert added to {}", list.label())))
    }

    /// Remove an event; absent entries are not an error
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn remove(
        &self,
        user: &User,
        list: ConcertList,
        event_id: Uuid,
    ) -> ServiceResult<MessageResponse> {
        if self
            .ctx
            .concert_list_repo()
            .remove(&user.id, list, event_id)
            .await?
        {
            info!(list = %list, event_id = %event_id, "Concert removed");
        }
        Ok(MessageResponse::new(format!(
            "Concert removed from {}",
            list.label()
        )))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, user_id: &str, list: ConcertList) -> ServiceResult<Vec<EventResponse>> {
        UserService::new(self.ctx).require_user(user_id).await?;
        let events = self.events(user_id, list).await?;
        Ok(events.iter().map(EventResponse::from).collect())
    }

    /// List contents in display order: attended newest first, wishlist
    /// soonest first and upcoming only, favorites as added
    pub(crate) async fn events(&self, user_id: &str, list: ConcertList) -> ServiceResult<Vec<Event>> {
        let mut events = self.ctx.concert_list_repo().events(user_id, list).await?;

        match list {
            ConcertList::Attended => {
                events.sort_by(|a, b| b.listing.datetime_local.cmp(&a.listing.datetime_local));
            }
            ConcertList::Wishlist => {
                let now = Utc::now().naive_utc();
                events.retain(|e| e.is_upcoming(now));
                events.sort_by_key(|e| e.listing.datetime_local);
            }
            ConcertList::Favorites => {}
        }

        Ok(events)
    }
}
