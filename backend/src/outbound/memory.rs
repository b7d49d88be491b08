//! In-memory implementations of the domain's driven ports.
//!
//! One [`InMemoryStore`] backs every repository port so a whole deployment
//! (or test) shares a single consistent view. Locks are held only for the
//! duration of a lookup or write, never across an await point. The policy
//! scope is applied inside each lookup, so a record outside the caller's
//! scope is reported exactly like a missing one.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::domain::community::{Community, TopicTarget};
use crate::domain::course::{Course, Level};
use crate::domain::ids::{CommunityId, CourseId, LevelId, SchoolId, TargetId, UserId};
use crate::domain::invitation::{Invitation, InvitationState, InvitationToken};
use crate::domain::policy::{CommunityScope, CourseScope};
use crate::domain::ports::{
    ApplicantRepository, ApplicantRepositoryError, CommunityRepository, CommunityRepositoryError,
    CourseRepository, CourseRepositoryError, InvitationRepository, InvitationRepositoryError,
    LevelRepository, LevelRepositoryError, SchoolRepository, SchoolRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::school::School;
use crate::domain::user::{Applicant, EmailAddress, FullName, LoginToken, Role, User};

/// Shared in-memory state behind all repository ports.
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

struct StoreInner {
    school: School,
    courses: HashMap<CourseId, Course>,
    levels: HashMap<LevelId, Level>,
    users: HashMap<UserId, User>,
    login_tokens: HashMap<UserId, LoginToken>,
    course_authors: HashMap<CourseId, Vec<UserId>>,
    applicants: Vec<Applicant>,
    communities: HashMap<CommunityId, Community>,
    targets: HashMap<TargetId, TopicTarget>,
    invitations: HashMap<InvitationToken, Invitation>,
    rng: SmallRng,
}

fn lock_poisoned<E>(make: impl FnOnce(String) -> E) -> E {
    make("store lock poisoned".to_owned())
}

impl InMemoryStore {
    /// Create a store serving the given school.
    pub fn new(school: School) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                school,
                courses: HashMap::new(),
                levels: HashMap::new(),
                users: HashMap::new(),
                login_tokens: HashMap::new(),
                course_authors: HashMap::new(),
                applicants: Vec::new(),
                communities: HashMap::new(),
                targets: HashMap::new(),
                invitations: HashMap::new(),
                rng: SmallRng::from_entropy(),
            }),
        }
    }

    /// Seed a course.
    pub fn insert_course(&self, course: Course) {
        if let Ok(mut inner) = self.inner.write() {
            inner.courses.insert(course.id().clone(), course);
        }
    }

    /// Seed a level.
    pub fn insert_level(&self, level: Level) {
        if let Ok(mut inner) = self.inner.write() {
            inner.levels.insert(level.id().clone(), level);
        }
    }

    /// Seed a user.
    pub fn insert_user(&self, user: User) {
        if let Ok(mut inner) = self.inner.write() {
            inner.users.insert(user.id().clone(), user);
        }
    }

    /// Seed a community.
    pub fn insert_community(&self, community: Community) {
        if let Ok(mut inner) = self.inner.write() {
            inner.communities.insert(community.id().clone(), community);
        }
    }

    /// Seed a topic target.
    pub fn insert_target(&self, target: TopicTarget) {
        if let Ok(mut inner) = self.inner.write() {
            inner.targets.insert(target.id().clone(), target);
        }
    }

    /// Seed an invitation.
    pub fn insert_invitation(&self, invitation: Invitation) {
        if let Ok(mut inner) = self.inner.write() {
            inner
                .invitations
                .insert(invitation.token().clone(), invitation);
        }
    }

    /// Applicants captured so far, in insertion order.
    pub fn applicants(&self) -> Vec<Applicant> {
        self.inner
            .read()
            .map(|inner| inner.applicants.clone())
            .unwrap_or_default()
    }

    /// Levels currently stored for a course, ordered by number.
    pub fn levels_of(&self, course_id: &CourseId) -> Vec<Level> {
        self.inner
            .read()
            .map(|inner| {
                let mut levels: Vec<Level> = inner
                    .levels
                    .values()
                    .filter(|level| level.course_id() == course_id)
                    .cloned()
                    .collect();
                levels.sort_by_key(Level::number);
                levels
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl SchoolRepository for InMemoryStore {
    async fn current(&self) -> Result<School, SchoolRepositoryError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| lock_poisoned(|message| SchoolRepositoryError::Unavailable { message }))?;
        Ok(inner.school.clone())
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn find_scoped(
        &self,
        id: &CourseId,
        scope: &CourseScope,
    ) -> Result<Course, CourseRepositoryError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| lock_poisoned(|message| CourseRepositoryError::Unavailable { message }))?;
        inner
            .courses
            .get(id)
            .filter(|course| scope.permits(course))
            .cloned()
            .ok_or(CourseRepositoryError::NotFound)
    }

    async fn levels(&self, course_id: &CourseId) -> Result<Vec<Level>, CourseRepositoryError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| lock_poisoned(|message| CourseRepositoryError::Unavailable { message }))?;
        let mut levels: Vec<Level> = inner
            .levels
            .values()
            .filter(|level| level.course_id() == course_id)
            .cloned()
            .collect();
        levels.sort_by_key(Level::number);
        Ok(levels)
    }
}

#[async_trait]
impl LevelRepository for InMemoryStore {
    async fn find_in_school(
        &self,
        id: &LevelId,
        school_id: &SchoolId,
    ) -> Result<Level, LevelRepositoryError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| lock_poisoned(|message| LevelRepositoryError::Unavailable { message }))?;
        inner
            .levels
            .get(id)
            .filter(|level| {
                inner
                    .courses
                    .get(level.course_id())
                    .is_some_and(|course| course.school_id() == school_id)
            })
            .cloned()
            .ok_or(LevelRepositoryError::NotFound)
    }

    async fn merge(
        &self,
        delete_id: &LevelId,
        merge_into_id: &LevelId,
    ) -> Result<(), LevelRepositoryError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| lock_poisoned(|message| LevelRepositoryError::Unavailable { message }))?;
        if !inner.levels.contains_key(merge_into_id) {
            return Err(LevelRepositoryError::NotFound);
        }
        inner
            .levels
            .remove(delete_id)
            .map(|_| ())
            .ok_or(LevelRepositoryError::NotFound)
    }
}

#[async_trait]
impl ApplicantRepository for InMemoryStore {
    async fn email_applied(
        &self,
        course_id: &CourseId,
        email: &EmailAddress,
    ) -> Result<bool, ApplicantRepositoryError> {
        let inner = self.inner.read().map_err(|_| {
            lock_poisoned(|message| ApplicantRepositoryError::Unavailable { message })
        })?;
        Ok(inner
            .applicants
            .iter()
            .any(|applicant| applicant.course_id() == course_id && applicant.email() == email))
    }

    async fn create(&self, applicant: Applicant) -> Result<Applicant, ApplicantRepositoryError> {
        let mut inner = self.inner.write().map_err(|_| {
            lock_poisoned(|message| ApplicantRepositoryError::Unavailable { message })
        })?;
        inner.applicants.push(applicant.clone());
        Ok(applicant)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| lock_poisoned(|message| UserRepositoryError::Unavailable { message }))?;
        Ok(inner.users.get(id).cloned())
    }

    async fn is_course_author(
        &self,
        course_id: &CourseId,
        email: &EmailAddress,
    ) -> Result<bool, UserRepositoryError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| lock_poisoned(|message| UserRepositoryError::Unavailable { message }))?;
        let Some(author_ids) = inner.course_authors.get(course_id) else {
            return Ok(false);
        };
        Ok(author_ids.iter().any(|id| {
            inner
                .users
                .get(id)
                .is_some_and(|user| user.email() == email)
        }))
    }

    async fn create_course_author(
        &self,
        course_id: &CourseId,
        name: FullName,
        email: EmailAddress,
    ) -> Result<User, UserRepositoryError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| lock_poisoned(|message| UserRepositoryError::Unavailable { message }))?;
        let school_id = inner.school.id().clone();

        let existing = inner
            .users
            .values()
            .find(|user| user.school_id() == &school_id && user.email() == &email)
            .cloned();
        let user = match existing {
            Some(user) => {
                let mut roles = user.roles().clone();
                roles.insert(Role::Author);
                let promoted = User::new(
                    user.id().clone(),
                    school_id,
                    email,
                    user.name().clone(),
                    roles,
                );
                inner.users.insert(promoted.id().clone(), promoted.clone());
                promoted
            }
            None => {
                let user = User::new(
                    UserId::random(),
                    school_id,
                    email,
                    name,
                    [Role::Author].into(),
                );
                inner.users.insert(user.id().clone(), user.clone());
                user
            }
        };

        inner
            .course_authors
            .entry(course_id.clone())
            .or_default()
            .push(user.id().clone());
        Ok(user)
    }

    async fn regenerate_login_token(
        &self,
        id: &UserId,
    ) -> Result<LoginToken, UserRepositoryError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| lock_poisoned(|message| UserRepositoryError::Unavailable { message }))?;
        if !inner.users.contains_key(id) {
            return Err(UserRepositoryError::NotFound);
        }

        let mut bytes = [0u8; 16];
        inner.rng.fill_bytes(&mut bytes);
        let token = LoginToken::new(hex::encode(bytes)).map_err(|err| {
            UserRepositoryError::Unavailable {
                message: err.to_string(),
            }
        })?;
        inner.login_tokens.insert(id.clone(), token.clone());
        Ok(token)
    }
}

#[async_trait]
impl CommunityRepository for InMemoryStore {
    async fn find_scoped(
        &self,
        id: &CommunityId,
        scope: &CommunityScope,
    ) -> Result<Community, CommunityRepositoryError> {
        let inner = self.inner.read().map_err(|_| {
            lock_poisoned(|message| CommunityRepositoryError::Unavailable { message })
        })?;
        inner
            .communities
            .get(id)
            .filter(|community| scope.permits(community))
            .cloned()
            .ok_or(CommunityRepositoryError::NotFound)
    }

    async fn find_target(
        &self,
        id: &TargetId,
    ) -> Result<Option<TopicTarget>, CommunityRepositoryError> {
        let inner = self.inner.read().map_err(|_| {
            lock_poisoned(|message| CommunityRepositoryError::Unavailable { message })
        })?;
        Ok(inner.targets.get(id).cloned())
    }
}

#[async_trait]
impl InvitationRepository for InMemoryStore {
    async fn find_by_token(
        &self,
        token: &InvitationToken,
    ) -> Result<Invitation, InvitationRepositoryError> {
        let inner = self.inner.read().map_err(|_| {
            lock_poisoned(|message| InvitationRepositoryError::Unavailable { message })
        })?;
        inner
            .invitations
            .get(token)
            .cloned()
            .ok_or(InvitationRepositoryError::NotFound)
    }

    async fn accept(
        &self,
        token: &InvitationToken,
        name: FullName,
        clear_startup: bool,
    ) -> Result<User, InvitationRepositoryError> {
        let mut inner = self.inner.write().map_err(|_| {
            lock_poisoned(|message| InvitationRepositoryError::Unavailable { message })
        })?;
        let invitation = inner
            .invitations
            .get(token)
            .cloned()
            .ok_or(InvitationRepositoryError::NotFound)?;
        if invitation.state() == InvitationState::Accepted {
            return Err(InvitationRepositoryError::AlreadyAccepted);
        }

        let accepted = invitation
            .accept(name.clone(), clear_startup)
            .map_err(|_| InvitationRepositoryError::AlreadyAccepted)?;
        let school_id = inner.school.id().clone();
        let user = User::new(
            accepted.user_id().clone(),
            school_id,
            accepted.email().clone(),
            name,
            [Role::Founder].into(),
        );
        inner.users.insert(user.id().clone(), user.clone());
        inner.invitations.insert(token.clone(), accepted);
        Ok(user)
    }
}
