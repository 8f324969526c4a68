//! Person value objects: participants and speakers.
//!
//! Both kinds of person are identified solely by their [`PersonId`]. Two
//! values with the same id are the same person, whatever their other fields
//! say, so equality and hashing only look at the id.

use crate::error::{EventError, Result, optional_text, require_non_blank};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque, non-empty person identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonId(String);

impl PersonId {
    /// Creates a `PersonId` from a trimmed, non-empty string
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `id` is blank.
    pub fn new(id: impl AsRef<str>) -> Result<Self> {
        require_non_blank(id.as_ref(), "Person id").map(Self)
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PersonId {
    type Error = EventError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PersonId> for String {
    fn from(id: PersonId) -> Self {
        id.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Email Value Object
// ============================================================================

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

/// Checks an address against the `local@domain.tld` pattern.
///
/// # Examples
///
/// ```
/// use event_roster_core::person::is_valid_email;
///
/// assert!(is_valid_email("ada@example.org"));
/// assert!(is_valid_email("first.last+tag@sub.example.co"));
/// assert!(!is_valid_email("ada@localhost"));
/// assert!(!is_valid_email("@example.org"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// A validated email address, trimmed and lower-cased
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalises and validates an email address
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the address is blank or malformed.
    pub fn parse(email: impl AsRef<str>) -> Result<Self> {
        let raw = email.as_ref();
        let normalised = require_non_blank(raw, "Email")?.to_lowercase();
        if !is_valid_email(&normalised) {
            return Err(EventError::invalid(format!(
                "Email address '{raw}' is not valid"
            )));
        }
        Ok(Self(normalised))
    }

    /// Get the address as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the `@`
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EventError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Name helpers
// ============================================================================

/// Capitalises each whitespace-delimited word ("jean  DUPONT" -> "Jean Dupont")
#[must_use]
pub fn display_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Upper-cased first character of each word ("Jean Dupont" -> "JD")
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// FNV-1a, used for pseudonyms that must not change between builds
fn stable_hash(value: &str) -> u32 {
    value.bytes().fold(0x811c_9dc5_u32, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    })
}

// ============================================================================
// Shared mutable fields
// ============================================================================

// A person is one value shared by every event that lists it, so the fields
// that can change live behind a lock and are updated through `&self`.

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Participant
// ============================================================================

/// Someone who can register for an event
///
/// The name and email can be updated through a shared reference, and every
/// event holding the same `Arc<Participant>` sees the change. The id never
/// changes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "ParticipantRecord", into = "ParticipantRecord")]
pub struct Participant {
    id: PersonId,
    contact: RwLock<Contact>,
}

#[derive(Clone, Debug)]
struct Contact {
    name: String,
    email: EmailAddress,
}

#[derive(Serialize, Deserialize)]
struct ParticipantRecord {
    id: String,
    name: String,
    email: String,
}

impl TryFrom<ParticipantRecord> for Participant {
    type Error = EventError;

    fn try_from(record: ParticipantRecord) -> Result<Self> {
        Self::new(record.id, record.name, record.email)
    }
}

impl From<Participant> for ParticipantRecord {
    fn from(participant: Participant) -> Self {
        let contact = participant
            .contact
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        Self {
            id: participant.id.into(),
            name: contact.name,
            email: contact.email.into(),
        }
    }
}

impl Participant {
    /// Creates a validated participant
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the id or name is blank, or the email is
    /// blank or malformed.
    pub fn new(
        id: impl AsRef<str>,
        name: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Result<Self> {
        Ok(Self {
            id: PersonId::new(id)?,
            contact: RwLock::new(Contact {
                name: require_non_blank(name.as_ref(), "Participant name")?,
                email: EmailAddress::parse(email)?,
            }),
        })
    }

    /// Unique identifier
    #[must_use]
    pub const fn id(&self) -> &PersonId {
        &self.id
    }

    /// Current name as entered (trimmed)
    #[must_use]
    pub fn name(&self) -> String {
        read(&self.contact).name.clone()
    }

    /// Current normalised email address
    #[must_use]
    pub fn email(&self) -> EmailAddress {
        read(&self.contact).email.clone()
    }

    /// Name with each word capitalised
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&read(&self.contact).name)
    }

    /// Upper-cased initials of the name
    #[must_use]
    pub fn initials(&self) -> String {
        initials(&read(&self.contact).name)
    }

    /// Whether the email belongs to `domain` (case-insensitive)
    #[must_use]
    pub fn has_email_domain(&self, domain: &str) -> bool {
        read(&self.contact).email.domain() == domain.trim().to_lowercase()
    }

    /// Replaces the email address, for every event sharing this participant
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the new address is blank or malformed;
    /// the current address is kept.
    pub fn update_email(&self, email: impl AsRef<str>) -> Result<()> {
        let email = EmailAddress::parse(email)?;
        write(&self.contact).email = email;
        tracing::debug!(participant_id = %self.id, "Participant email updated");
        Ok(())
    }

    /// Replaces the name, for every event sharing this participant
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the new name is blank.
    pub fn update_name(&self, name: impl AsRef<str>) -> Result<()> {
        let name = require_non_blank(name.as_ref(), "Participant name")?;
        write(&self.contact).name = name;
        tracing::debug!(participant_id = %self.id, "Participant name updated");
        Ok(())
    }

    /// A detached copy suitable for statistics: pseudonymous id and email,
    /// name reduced to the initials.
    #[must_use]
    pub fn anonymized(&self) -> Self {
        let contact = read(&self.contact);
        Self {
            id: PersonId(format!("ANON_{}", stable_hash(self.id.as_str()))),
            contact: RwLock::new(Contact {
                name: format!("Participant {}", initials(&contact.name)),
                email: EmailAddress(format!(
                    "anonymous{}@example.com",
                    stable_hash(contact.email.as_str())
                )),
            }),
        }
    }
}

impl Clone for Participant {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            contact: RwLock::new(read(&self.contact).clone()),
        }
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contact = read(&self.contact);
        write!(f, "{} <{}>", display_name(&contact.name), contact.email)
    }
}

// ============================================================================
// Intervenant (speaker)
// ============================================================================

/// A speaker or expert invited to a conference
///
/// Id, name and specialty are fixed. The optional contact details can be
/// updated through a shared reference, like a [`Participant`]'s.
#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "IntervenantRecord", into = "IntervenantRecord")]
pub struct Intervenant {
    id: PersonId,
    name: String,
    specialty: String,
    profile: RwLock<Profile>,
}

#[derive(Clone, Debug, Default)]
struct Profile {
    email: Option<EmailAddress>,
    biography: Option<String>,
    institution: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct IntervenantRecord {
    id: String,
    name: String,
    specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    biography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    institution: Option<String>,
}

impl TryFrom<IntervenantRecord> for Intervenant {
    type Error = EventError;

    fn try_from(record: IntervenantRecord) -> Result<Self> {
        let speaker = Self::new(record.id, record.name, record.specialty)?;
        speaker.update_email(record.email.as_deref())?;
        speaker.update_biography(record.biography.as_deref());
        speaker.update_institution(record.institution.as_deref());
        Ok(speaker)
    }
}

impl From<Intervenant> for IntervenantRecord {
    fn from(speaker: Intervenant) -> Self {
        let profile = speaker
            .profile
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        Self {
            id: speaker.id.into(),
            name: speaker.name,
            specialty: speaker.specialty,
            email: profile.email.map(Into::into),
            biography: profile.biography,
            institution: profile.institution,
        }
    }
}

impl Intervenant {
    /// Creates a speaker with no contact details
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the id, name or specialty is blank.
    pub fn new(
        id: impl AsRef<str>,
        name: impl AsRef<str>,
        specialty: impl AsRef<str>,
    ) -> Result<Self> {
        Ok(Self {
            id: PersonId::new(id)?,
            name: require_non_blank(name.as_ref(), "Speaker name")?,
            specialty: require_non_blank(specialty.as_ref(), "Speaker specialty")?,
            profile: RwLock::new(Profile::default()),
        })
    }

    /// Sets the contact email
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the address is malformed.
    pub fn with_email(self, email: impl AsRef<str>) -> Result<Self> {
        self.update_email(Some(email.as_ref()))?;
        Ok(self)
    }

    /// Sets the biography
    #[must_use]
    pub fn with_biography(self, biography: impl AsRef<str>) -> Self {
        self.update_biography(Some(biography.as_ref()));
        self
    }

    /// Sets the institution
    #[must_use]
    pub fn with_institution(self, institution: impl AsRef<str>) -> Self {
        self.update_institution(Some(institution.as_ref()));
        self
    }

    /// Unique identifier
    #[must_use]
    pub const fn id(&self) -> &PersonId {
        &self.id
    }

    /// Name as entered (trimmed)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field of expertise
    #[must_use]
    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    /// Contact email, if any
    #[must_use]
    pub fn email(&self) -> Option<EmailAddress> {
        read(&self.profile).email.clone()
    }

    /// Short biography, if any
    #[must_use]
    pub fn biography(&self) -> Option<String> {
        read(&self.profile).biography.clone()
    }

    /// Affiliated institution, if any
    #[must_use]
    pub fn institution(&self) -> Option<String> {
        read(&self.profile).institution.clone()
    }

    /// Name with each word capitalised
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    /// Upper-cased initials of the name
    #[must_use]
    pub fn initials(&self) -> String {
        initials(&self.name)
    }

    /// Whether the specialty mentions `domain` (case-insensitive)
    #[must_use]
    pub fn has_specialty_in(&self, domain: &str) -> bool {
        self.specialty
            .to_lowercase()
            .contains(&domain.trim().to_lowercase())
    }

    /// Whether a contact email is set
    #[must_use]
    pub fn has_email(&self) -> bool {
        read(&self.profile).email.is_some()
    }

    /// Whether a biography is set
    #[must_use]
    pub fn has_biography(&self) -> bool {
        read(&self.profile).biography.is_some()
    }

    /// Whether an institution is set
    #[must_use]
    pub fn has_institution(&self) -> bool {
        read(&self.profile).institution.is_some()
    }

    /// Replaces the contact email; `None` or a blank value clears it
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a non-blank address is malformed; the
    /// current address is kept.
    pub fn update_email(&self, email: Option<&str>) -> Result<()> {
        let email = optional_text(email).map(EmailAddress::parse).transpose()?;
        write(&self.profile).email = email;
        Ok(())
    }

    /// Replaces the biography; `None` or a blank value clears it
    pub fn update_biography(&self, biography: Option<&str>) {
        write(&self.profile).biography = optional_text(biography);
    }

    /// Replaces the institution; `None` or a blank value clears it
    pub fn update_institution(&self, institution: Option<&str>) {
        write(&self.profile).institution = optional_text(institution);
    }

    /// A detached copy suitable for statistics: pseudonymous id and name, no
    /// contact details, specialty preserved.
    #[must_use]
    pub fn anonymized(&self) -> Self {
        Self {
            id: PersonId(format!("ANON_INT_{}", stable_hash(self.id.as_str()))),
            name: format!("Speaker {}", stable_hash(&self.name)),
            specialty: self.specialty.clone(),
            profile: RwLock::new(Profile::default()),
        }
    }
}

impl Clone for Intervenant {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            specialty: self.specialty.clone(),
            profile: RwLock::new(read(&self.profile).clone()),
        }
    }
}

impl PartialEq for Intervenant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Intervenant {}

impl Hash for Intervenant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Intervenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())?;
        if let Some(institution) = &read(&self.profile).institution {
            write!(f, " ({institution})")?;
        }
        write!(f, " - {}", self.specialty)
    }
}
