use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use bitflags::bitflags;

use crate::metadata::{
    identity::{format_full_name, AssemblyHashAlgorithm, AssemblyIdentity, AssemblyVersion, Identity},
    token::Token,
};

/// A reference to an `AssemblyRef`
pub type AssemblyRefRc = Arc<AssemblyRef>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Flags of an assembly reference, §II.23.1.2
    pub struct AssemblyFlags: u32 {
        /// The assembly reference holds the full (unhashed) public key
        const PUBLIC_KEY = 0x0001;
        /// The implementation used at runtime is not expected to match the version seen at compile time
        const RETARGETABLE = 0x0100;
        /// The referenced assembly is a Windows Runtime metadata file
        const CONTENT_TYPE_WINDOWS_RUNTIME = 0x0200;
    }
}

/// A reference to an external assembly, as read from an assembly-qualified name.
///
/// `rid` and `token` are assigned by the destination context on registration; a reference
/// produced by [`crate::metadata::typename::parse_assembly_ref`] keeps a null token.
/// Equality ignores both.
#[derive(Debug, Clone)]
pub struct AssemblyRef {
    /// `RowID`
    pub rid: u32,
    /// Token
    pub token: Token,
    /// The name of the Assembly
    pub name: String,
    /// Four-part version, 0.0.0.0 when absent
    pub version: AssemblyVersion,
    /// Culture string, `None` for neutral
    pub culture: Option<String>,
    /// The identifier of the referenced assembly, either a pub-key or token
    pub identifier: Option<Identity>,
    /// Flags
    pub flags: AssemblyFlags,
}

impl AssemblyRef {
    /// Name of the sentinel returned by [`AssemblyRef::current_assembly`]
    pub const CURRENT_ASSEMBLY_NAME: &'static str = "<<<CURRENT_ASSEMBLY>>>";

    /// Create an unregistered reference with the given name and all other fields defaulted.
    pub fn new(name: impl Into<String>) -> Self {
        AssemblyRef {
            rid: 0,
            token: Token::default(),
            name: name.into(),
            version: AssemblyVersion::UNKNOWN,
            culture: None,
            identifier: None,
            flags: AssemblyFlags::empty(),
        }
    }

    /// Create an unregistered reference pointing at the assembly described by `identity`.
    #[must_use]
    pub fn from_identity(identity: &AssemblyIdentity) -> Self {
        let mut flags = AssemblyFlags::empty();
        if matches!(&identity.strong_name, Some(Identity::PubKey(key)) if !key.is_empty()) {
            flags |= AssemblyFlags::PUBLIC_KEY;
        }

        AssemblyRef {
            rid: 0,
            token: Token::default(),
            name: identity.name.clone(),
            version: identity.version,
            culture: identity.culture.clone(),
            identifier: identity.strong_name.clone(),
            flags,
        }
    }

    /// The shared sentinel standing for "the assembly currently being processed".
    ///
    /// Used when a type name carries no assembly qualifier and neither the finder nor the
    /// destination context can name an assembly.
    pub fn current_assembly() -> AssemblyRefRc {
        static CURRENT: OnceLock<AssemblyRefRc> = OnceLock::new();
        CURRENT
            .get_or_init(|| Arc::new(AssemblyRef::new(Self::CURRENT_ASSEMBLY_NAME)))
            .clone()
    }

    /// Returns `true` if this is the current-assembly sentinel
    #[must_use]
    pub fn is_current_assembly(&self) -> bool {
        self.name == Self::CURRENT_ASSEMBLY_NAME
    }

    /// Full name, using the public key form when the reference carries a full key.
    ///
    /// Laid out like [`AssemblyIdentity::full_name`], e.g.
    /// `"mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format_full_name(
            &self.name,
            &self.version,
            self.culture.as_deref(),
            self.identifier.as_ref(),
            false,
        )
    }

    /// Full name, always in the `PublicKeyToken=` form.
    ///
    /// A full public key is reduced to its SHA1 token.
    #[must_use]
    pub fn full_name_token(&self) -> String {
        format_full_name(
            &self.name,
            &self.version,
            self.culture.as_deref(),
            self.identifier.as_ref(),
            true,
        )
    }

    /// Public key token of the referenced assembly, derived from the key if necessary.
    ///
    /// Returns `None` when the reference has no strong name or an explicit `null`.
    #[must_use]
    pub fn public_key_token(&self) -> Option<Vec<u8>> {
        self.identifier
            .as_ref()
            .and_then(|id| id.to_token(AssemblyHashAlgorithm::SHA1).ok())
            .filter(|token| !token.is_empty())
    }

    /// Returns `true` if the `Retargetable` flag is set
    #[must_use]
    pub fn is_retargetable(&self) -> bool {
        self.flags.contains(AssemblyFlags::RETARGETABLE)
    }
}

impl PartialEq for AssemblyRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.version == other.version
            && self.culture == other.culture
            && self.identifier == other.identifier
            && self.flags == other.flags
    }
}

impl Eq for AssemblyRef {}

impl fmt::Display for AssemblyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}
