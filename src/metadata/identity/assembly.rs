//! Assembly identity and version numbering.
//!
//! # ECMA-335 References
//!
//! - **Section II.6.1**: Overview of assemblies - defines assembly identity components
//! - **Section II.6.2.1**: Assembly versioning - four-part version number semantics
//! - **Section II.6.2.1.3**: Public key and token - strong name identity format
//! - **Section II.22.5**: AssemblyRef table - assembly reference structure
//!
//! # Key Components
//!
//! - [`AssemblyIdentity`] - Name, version, culture and strong name of an assembly
//! - [`AssemblyVersion`] - Four-part version numbering (major.minor.build.revision)
//!
//! A destination context uses its [`AssemblyIdentity`] to decide whether a parsed
//! assembly reference points back at the module being processed. Both
//! [`AssemblyIdentity::full_name`] and [`AssemblyIdentity::full_name_token`] use the same
//! layout as [`crate::metadata::typesystem::AssemblyRef::full_name`], so a plain string
//! comparison is enough.
//!
//! # Examples
//!
//! ```rust
//! use cilname::metadata::identity::{AssemblyIdentity, AssemblyVersion};
//!
//! let mscorlib = AssemblyIdentity::parse(
//!     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
//! )?;
//! assert_eq!(mscorlib.version, AssemblyVersion::new(4, 0, 0, 0));
//! assert_eq!(
//!     mscorlib.full_name_token(),
//!     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"
//! );
//! # Ok::<(), cilname::Error>(())
//! ```

use std::{fmt, fmt::Write as _, str::FromStr};

use crate::{
    metadata::{
        identity::{AssemblyHashAlgorithm, Identity},
        typename::parse_assembly_ref,
        typesystem::AssemblyRef,
    },
    Error, Result,
};

/// Complete identity of an assembly.
///
/// Equality and hashing cover name, version and culture. The strong name is excluded
/// so that identities carrying a public key and identities carrying only its token compare
/// equal.
#[derive(Debug, Clone)]
pub struct AssemblyIdentity {
    /// Simple assembly name (e.g., "mscorlib", "System.Core")
    pub name: String,
    /// Four-part version number
    pub version: AssemblyVersion,
    /// Culture of a satellite assembly; `None` for culture-neutral assemblies
    pub culture: Option<String>,
    /// Public key or public key token
    pub strong_name: Option<Identity>,
}

impl PartialEq for AssemblyIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.version == other.version && self.culture == other.culture
    }
}

impl Eq for AssemblyIdentity {}

impl std::hash::Hash for AssemblyIdentity {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.version.hash(state);
        self.culture.hash(state);
    }
}

/// Four-part version numbering for .NET assemblies.
///
/// Components are 32 bit wide so that any value accepted by the display name grammar
/// is representable. Versions are compared component-wise in order: major, minor,
/// build, revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AssemblyVersion {
    /// Major version component
    pub major: u32,
    /// Minor version component
    pub minor: u32,
    /// Build version component
    pub build: u32,
    /// Revision version component
    pub revision: u32,
}

impl AssemblyIdentity {
    /// Create a new assembly identity with the specified components.
    ///
    /// # Arguments
    ///
    /// * `name` - Simple assembly name for identification
    /// * `version` - Four-part version number
    /// * `culture` - Optional culture for localized assemblies
    /// * `strong_name` - Optional cryptographic identity
    pub fn new(
        name: impl Into<String>,
        version: AssemblyVersion,
        culture: Option<String>,
        strong_name: Option<Identity>,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            culture,
            strong_name,
        }
    }

    /// Create an assembly identity from a parsed assembly reference.
    #[must_use]
    pub fn from_assembly_ref(assembly_ref: &AssemblyRef) -> Self {
        Self {
            name: assembly_ref.name.clone(),
            version: assembly_ref.version,
            culture: assembly_ref.culture.clone(),
            strong_name: assembly_ref.identifier.clone(),
        }
    }

    /// Parse an assembly identity from its display name.
    ///
    /// Accepts the same grammar as [`parse_assembly_ref`], e.g.
    /// `"System.Core, Version=3.5.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"`.
    ///
    /// # Errors
    /// Returns an error if the display name is malformed.
    pub fn parse(display_name: &str) -> Result<Self> {
        let assembly_ref = parse_assembly_ref(display_name)?;
        Ok(Self::from_assembly_ref(&assembly_ref))
    }

    /// Full name of the assembly.
    ///
    /// Uses the `PublicKey=` form when a full public key is known, the `PublicKeyToken=`
    /// form otherwise.
    #[must_use]
    pub fn full_name(&self) -> String {
        format_full_name(
            &self.name,
            &self.version,
            self.culture.as_deref(),
            self.strong_name.as_ref(),
            false,
        )
    }

    /// Full name of the assembly, always in the `PublicKeyToken=` form.
    ///
    /// A full public key is reduced to its SHA1 token.
    #[must_use]
    pub fn full_name_token(&self) -> String {
        format_full_name(
            &self.name,
            &self.version,
            self.culture.as_deref(),
            self.strong_name.as_ref(),
            true,
        )
    }

    /// Get the simple assembly name without version or culture information.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Check if this assembly is strong-named.
    #[must_use]
    pub fn is_strong_named(&self) -> bool {
        self.strong_name.as_ref().is_some_and(|id| !id.is_null())
    }

    /// Check if this assembly is culture-neutral.
    #[must_use]
    pub fn is_culture_neutral(&self) -> bool {
        self.culture.is_none()
    }
}

/// Formats `Name, Version=a.b.c.d, Culture=x, PublicKey[Token]=hex|null`.
pub(crate) fn format_full_name(
    name: &str,
    version: &AssemblyVersion,
    culture: Option<&str>,
    key: Option<&Identity>,
    token_form: bool,
) -> String {
    let mut result = String::with_capacity(name.len() + 80);

    result.push_str(name);
    let _ = write!(result, ", Version={}", version);
    let _ = write!(result, ", Culture={}", culture.unwrap_or("neutral"));

    match key {
        Some(Identity::PubKey(data)) if !token_form && !data.is_empty() => {
            let _ = write!(result, ", PublicKey={}", hex::encode(data));
        }
        Some(identity) => {
            let token = identity
                .to_token(AssemblyHashAlgorithm::SHA1)
                .unwrap_or_default();
            if token.is_empty() {
                result.push_str(", PublicKeyToken=null");
            } else {
                let _ = write!(result, ", PublicKeyToken={}", hex::encode(token));
            }
        }
        None => result.push_str(", PublicKeyToken=null"),
    }

    result
}

impl AssemblyVersion {
    /// Version 0.0.0.0, used when a reference carries no `Version` key.
    pub const UNKNOWN: Self = Self {
        major: 0,
        minor: 0,
        build: 0,
        revision: 0,
    };

    /// Create a new assembly version with the specified components.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cilname::metadata::identity::AssemblyVersion;
    ///
    /// let version = AssemblyVersion::new(1, 2, 3, 4);
    /// assert_eq!(version.major, 1);
    /// assert_eq!(version.to_string(), "1.2.3.4");
    /// ```
    #[must_use]
    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Returns `true` for version 0.0.0.0
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }

    /// Parse a version from dotted notation.
    ///
    /// One to four decimal components are accepted; missing components default to 0.
    /// Surrounding whitespace of each component is ignored.
    ///
    /// # Errors
    /// Returns [`Error::IntegerOverflow`] with the byte offset of the offending component if
    /// it does not fit in 32 bits, and [`Error::Malformed`] for any other invalid format.
    pub fn parse(version_str: &str) -> Result<Self> {
        let parts: Vec<&str> = version_str.split('.').collect();

        if parts.len() > 4 {
            return Err(malformed_error!("Invalid version format: {}", version_str));
        }

        let mut components = [0u32; 4];
        let mut offset = 0;

        for (i, part) in parts.iter().enumerate() {
            let digits = part.trim();
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed_error!("Invalid version component: '{}'", part));
            }

            components[i] = digits
                .parse::<u32>()
                .map_err(|_| Error::IntegerOverflow(offset))?;
            offset += part.len() + 1;
        }

        Ok(Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

impl FromStr for AssemblyVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl FromStr for AssemblyIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
