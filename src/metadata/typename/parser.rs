//! Recursive descent parser for reflection type names.
//!
//! # Grammar
//!
//! ```text
//! Type        := GenericVar TSpec* (',' AssemblyRef)? | NamedType
//! GenericVar  := '!' ['!'] UInt
//! NamedType   := Id ('+' Id)* TSpec* (',' AssemblyRef)?
//! TSpec       := '[' ']' | '[' ArrayDims ']' | '[' GenericArgs ']' | '&' | '*'
//! ArrayDims   := Dim (',' Dim)*
//! Dim         := ε | '*' | Int '..' ( '.' | '.'? Int )
//! GenericArgs := Arg (',' Arg)*
//! Arg         := '[' Type ']' | Type-without-assembly
//! AssemblyRef := AsmName (',' (Key '=' Value)?)*
//! ```
//!
//! Every named type and assembly reference is registered with the destination
//! [`TypeNameContext`] as soon as it is read. The outermost type of a nested chain gets its
//! resolution scope after the chain, its suffixes and the optional assembly qualifier have
//! been read.

use std::sync::Arc;

use log::{debug, trace, warn};

use crate::{
    metadata::{
        identity::{AssemblyVersion, Identity},
        signatures::TypeSignature,
        typename::{
            builder::{TypeSignatureBuilder, TypeSpecifier},
            guard::RecursionGuard,
            lexer::LexicalReader,
            syntax::{ReflectionSyntax, TypeNameSyntax},
        },
        typesystem::{
            AssemblyFlags, AssemblyRef, AssemblyRefFinder, AssemblyRefRc, ResolutionScope,
            TypeDefOrRef, TypeNameContext, TypeRef, TypeRefRc,
        },
    },
    Error, Result,
};

/// Maximum accepted length of a type name, in bytes
pub const MAX_TYPE_NAME_LENGTH: usize = 0x10000;

/// Maximum size of a single array dimension
pub const MAX_ARRAY_SIZE: i64 = 0x1FFF_FFFF;

/// Parser for a single type name.
///
/// A parser is created for one input string and consumed by [`TypeNameParser::parse_signature`]
/// or [`TypeNameParser::parse_type_ref`].
pub struct TypeNameParser<'a, C: TypeNameContext + ?Sized, S: TypeNameSyntax = ReflectionSyntax> {
    lexer: LexicalReader<'a, S>,
    guard: RecursionGuard,
    context: &'a C,
    finder: Option<&'a dyn AssemblyRefFinder>,
}

impl<'a, C: TypeNameContext + ?Sized, S: TypeNameSyntax> TypeNameParser<'a, C, S> {
    /// Create a new parser.
    ///
    /// ## Arguments
    /// * `context` - Destination context that registers and resolves nodes
    /// * `full_name` - The type name to parse
    /// * `finder` - Supplies assemblies for names without an assembly qualifier
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `full_name` is longer than [`MAX_TYPE_NAME_LENGTH`].
    pub fn new(
        context: &'a C,
        full_name: &'a str,
        finder: Option<&'a dyn AssemblyRefFinder>,
    ) -> Result<Self> {
        if full_name.len() > MAX_TYPE_NAME_LENGTH {
            return Err(malformed_error!(
                "Type name too long - {} bytes",
                full_name.len()
            ));
        }

        Ok(TypeNameParser {
            lexer: LexicalReader::new(full_name),
            guard: RecursionGuard::new(),
            context,
            finder,
        })
    }

    /// Parses the whole input as a type signature.
    ///
    /// # Errors
    /// Returns an error if the input is not a complete, valid type name.
    pub fn parse_signature(mut self) -> Result<TypeSignature> {
        let signature = self.read_type(true)?;
        expect_end(&mut self.lexer)?;
        Ok(signature)
    }

    /// Parses the whole input and returns the named type it denotes.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedConstruct`] if the input denotes an array, pointer,
    /// by-ref, generic instance or generic variable, and any error of
    /// [`TypeNameParser::parse_signature`].
    pub fn parse_type_ref(self) -> Result<TypeDefOrRef> {
        let signature = self.parse_signature()?;
        signature.type_def_or_ref().ok_or_else(|| {
            Error::UnsupportedConstruct(format!("'{}' is not a named type", signature))
        })
    }

    /// Runs `f` one recursion level deeper
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.guard.enter()?;
        let result = f(self);
        self.guard.exit();
        result
    }

    fn read_type(&mut self, read_assembly_ref: bool) -> Result<TypeSignature> {
        self.nested(|p| {
            if p.lexer.peek_non_whitespace() == Some('!') {
                p.read_generic_variable(read_assembly_ref)
            } else {
                p.read_named_type(read_assembly_ref)
            }
        })
    }

    fn read_generic_variable(&mut self, read_assembly_ref: bool) -> Result<TypeSignature> {
        self.lexer.advance();
        let signature = if self.lexer.eat('!') {
            TypeSignature::GenericParamMethod(self.lexer.read_uint32()?)
        } else {
            TypeSignature::GenericParamType(self.lexer.read_uint32()?)
        };

        let specs = self.read_tspecs()?;
        if read_assembly_ref {
            // The qualifier has no meaning for a generic variable
            let _ = self.read_optional_assembly_ref()?;
        }

        self.guard.exit_many(specs.len());
        TypeSignatureBuilder::fold(signature, specs)
    }

    fn read_named_type(&mut self, read_assembly_ref: bool) -> Result<TypeSignature> {
        let (root, leaf) = self.read_type_ref_and_nested()?;
        let specs = self.read_tspecs()?;

        let assembly = if read_assembly_ref {
            self.read_optional_assembly_ref()?
        } else {
            None
        };
        let assembly = match assembly {
            Some(assembly) => assembly,
            None => self.find_assembly_ref(&root),
        };
        root.set_resolution_scope(ResolutionScope::AssemblyRef(assembly.clone()));

        let signature = self.canonicalize(&root, leaf, &assembly);
        self.guard.exit_many(specs.len());
        TypeSignatureBuilder::fold(signature, specs)
    }

    /// Reads `Id ('+' Id)*`, returning the outermost and the innermost reference
    fn read_type_ref_and_nested(&mut self) -> Result<(TypeRefRc, TypeRefRc)> {
        let root = self.read_type_ref(None)?;

        let mut leaf = root.clone();
        while self.lexer.peek_non_whitespace() == Some(S::NESTED_SEPARATOR) {
            self.lexer.advance();
            leaf = self.read_type_ref(Some(leaf))?;
        }

        Ok((root, leaf))
    }

    fn read_type_ref(&mut self, enclosing: Option<TypeRefRc>) -> Result<TypeRefRc> {
        let id = self.lexer.read_id(false, false)?;
        let (namespace, name) = TypeRef::split_name(&id);

        let type_ref = TypeRef::new(namespace, name);
        if let Some(enclosing) = enclosing {
            type_ref.set_resolution_scope(ResolutionScope::TypeRef(enclosing));
        }

        Ok(self.context.register_type_ref(type_ref))
    }

    fn find_assembly_ref(&self, root: &TypeRef) -> AssemblyRefRc {
        if let Some(assembly) = self
            .finder
            .and_then(|finder| finder.find_assembly_ref(root))
        {
            return assembly;
        }

        match self.context.assembly() {
            Some(own) => {
                debug!("No assembly for '{}', using '{}'", root, own.name);
                self.context
                    .register_assembly_ref(AssemblyRef::from_identity(own))
            }
            None => {
                debug!("No assembly for '{}', using the current assembly", root);
                AssemblyRef::current_assembly()
            }
        }
    }

    /// Turns the innermost named type into a signature, substituting canonical primitives
    /// and local definitions
    fn canonicalize(
        &self,
        root: &TypeRefRc,
        leaf: TypeRefRc,
        assembly: &AssemblyRef,
    ) -> TypeSignature {
        if Arc::ptr_eq(root, &leaf) {
            if let Some(primitive) =
                self.context
                    .resolve_canonical_primitive(&leaf.namespace, &leaf.name, assembly)
            {
                trace!("'{}' resolved to a corlib primitive", leaf);
                return primitive;
            }
        }

        if let Some(type_def) = self.context.resolve_local_definition(assembly, &leaf) {
            trace!("'{}' resolved to local definition {}", leaf, type_def.token);
            return if type_def.is_value_type() {
                TypeSignature::ValueType(TypeDefOrRef::TypeDef(type_def))
            } else {
                TypeSignature::Class(TypeDefOrRef::TypeDef(type_def))
            };
        }

        TypeSignature::Class(TypeDefOrRef::TypeRef(leaf))
    }

    fn read_optional_assembly_ref(&mut self) -> Result<Option<AssemblyRefRc>> {
        if self.lexer.peek_non_whitespace() != Some(',') {
            return Ok(None);
        }

        self.lexer.advance();
        let assembly = read_assembly_ref(&mut self.lexer)?;
        Ok(Some(self.context.register_assembly_ref(assembly)))
    }

    /// Reads the suffixes of a type.
    ///
    /// Every suffix wraps the signature one level deeper and is counted against the
    /// recursion guard until the caller releases it with [`RecursionGuard::exit_many`].
    fn read_tspecs(&mut self) -> Result<Vec<TypeSpecifier>> {
        let mut specs = Vec::new();
        loop {
            if matches!(self.lexer.peek_non_whitespace(), Some('[' | '&' | '*')) {
                self.guard.enter()?;
            }

            match self.lexer.peek_non_whitespace() {
                Some('[') => {
                    self.lexer.advance();
                    let spec = match self.lexer.peek_non_whitespace() {
                        Some(']') => {
                            self.lexer.advance();
                            TypeSpecifier::SzArray
                        }
                        Some(c) if c == '*' || c == ',' || c == '-' || c.is_ascii_digit() => {
                            self.read_array_dimensions()?
                        }
                        _ => self.read_generic_arguments()?,
                    };
                    specs.push(spec);
                }
                Some('&') => {
                    self.lexer.advance();
                    specs.push(TypeSpecifier::ByRef);
                }
                Some('*') => {
                    self.lexer.advance();
                    specs.push(TypeSpecifier::Pointer);
                }
                _ => return Ok(specs),
            }
        }
    }

    fn read_array_dimensions(&mut self) -> Result<TypeSpecifier> {
        let mut rank: u32 = 0;
        let mut sizes = Vec::new();
        let mut lower_bounds = Vec::new();

        loop {
            match self.lexer.peek_non_whitespace() {
                Some('*') => {
                    self.lexer.advance();
                }
                Some(',') | Some(']') => {}
                Some(c) if c == '-' || c.is_ascii_digit() => {
                    let (lower, size) = self.read_dimension_bounds()?;
                    if lower_bounds.len() == rank as usize {
                        lower_bounds.push(lower);
                    }
                    if let Some(size) = size {
                        if sizes.len() == rank as usize {
                            sizes.push(size);
                        }
                    }
                }
                Some(c) => {
                    return Err(malformed_error!(
                        "Unexpected '{}' in array dimensions at offset {}",
                        c,
                        self.lexer.pos()
                    ))
                }
                None => return Err(malformed_error!("Unterminated array dimensions")),
            }

            rank = rank
                .checked_add(1)
                .ok_or(Error::IntegerOverflow(self.lexer.pos()))?;

            if self.lexer.peek_non_whitespace() != Some(',') {
                break;
            }
            self.lexer.advance();
        }

        self.lexer.expect(']')?;
        Ok(TypeSpecifier::Array {
            rank,
            sizes,
            lower_bounds,
        })
    }

    /// Reads `lower..upper`, `lower...upper` or `lower...`
    fn read_dimension_bounds(&mut self) -> Result<(i32, Option<u32>)> {
        let lower = self.lexer.read_int32()?;
        self.lexer.expect('.')?;
        if !self.lexer.eat('.') {
            return Err(malformed_error!(
                "Expected '..' at offset {}",
                self.lexer.pos()
            ));
        }

        let ilasm_style = self.lexer.eat('.');
        let upper = match self.lexer.peek_non_whitespace() {
            Some('-') => i64::from(self.lexer.read_int32()?),
            Some(c) if c.is_ascii_digit() => i64::from(self.lexer.read_uint32()?),
            _ if ilasm_style => return Ok((lower, None)),
            _ => {
                return Err(malformed_error!(
                    "Expected an upper bound at offset {}",
                    self.lexer.pos()
                ))
            }
        };

        if upper < i64::from(lower) {
            return Err(Error::InvalidArrayBound { lower, upper });
        }

        let size = upper - i64::from(lower) + 1;
        if size <= 0 || size > MAX_ARRAY_SIZE {
            return Err(Error::InvalidArraySize(size));
        }

        Ok((lower, u32::try_from(size).ok()))
    }

    fn read_generic_arguments(&mut self) -> Result<TypeSpecifier> {
        let mut args = Vec::new();
        loop {
            let bracketed = self.lexer.peek_non_whitespace() == Some('[');
            if bracketed {
                self.lexer.advance();
            }

            args.push(self.read_type(bracketed)?);

            if bracketed {
                self.lexer.expect(']')?;
            }

            if self.lexer.peek_non_whitespace() != Some(',') {
                break;
            }
            self.lexer.advance();
        }

        self.lexer.expect(']')?;
        Ok(TypeSpecifier::GenericInst(args))
    }
}

/// Reads `AsmName (',' (Key '=' Value)?)*` into an unregistered [`AssemblyRef`].
///
/// The list ends at `]`, at the end of input, or at the first key not followed by `,`.
/// Keys without `=` are skipped and unknown keys are ignored.
pub(crate) fn read_assembly_ref<S: TypeNameSyntax>(
    lexer: &mut LexicalReader<'_, S>,
) -> Result<AssemblyRef> {
    let mut assembly = AssemblyRef::new(lexer.read_assembly_name_id()?);

    if lexer.peek_non_whitespace() != Some(',') {
        return Ok(assembly);
    }
    lexer.advance();

    loop {
        match lexer.peek_non_whitespace() {
            None | Some(']') => break,
            Some(',') => {
                lexer.advance();
                continue;
            }
            Some(_) => {}
        }

        let key = lexer.read_id(true, true)?;
        if lexer.peek_non_whitespace() == Some('=') {
            lexer.advance();

            let value_start = lexer.pos();
            let value = lexer.read_id(true, true)?;
            apply_assembly_key(&mut assembly, &key, &value).map_err(|e| match e {
                Error::IntegerOverflow(offset) => Error::IntegerOverflow(value_start + offset),
                other => other,
            })?;
        } else {
            warn!("Skipping assembly name key '{}' without a value", key);
        }

        // Keys are separated by ','; anything else is left to the caller
        if !matches!(lexer.peek_non_whitespace(), None | Some(',' | ']')) {
            break;
        }
    }

    Ok(assembly)
}

fn apply_assembly_key(assembly: &mut AssemblyRef, key: &str, value: &str) -> Result<()> {
    let is_null = value.eq_ignore_ascii_case("null") || value.eq_ignore_ascii_case("neutral");

    match key.to_ascii_uppercase().as_str() {
        "VERSION" => assembly.version = AssemblyVersion::parse(value)?,
        "CONTENTTYPE" => assembly.flags.set(
            AssemblyFlags::CONTENT_TYPE_WINDOWS_RUNTIME,
            value.eq_ignore_ascii_case("WindowsRuntime"),
        ),
        "RETARGETABLE" => assembly
            .flags
            .set(AssemblyFlags::RETARGETABLE, value.eq_ignore_ascii_case("Yes")),
        "PUBLICKEY" => {
            let key = if is_null { Vec::new() } else { parse_hex(value)? };
            assembly.flags.set(AssemblyFlags::PUBLIC_KEY, !key.is_empty());
            assembly.identifier = Some(Identity::PubKey(key));
        }
        "PUBLICKEYTOKEN" => {
            let token = if is_null { Vec::new() } else { parse_hex(value)? };
            if !token.is_empty() && token.len() != 8 {
                return Err(malformed_error!(
                    "Public key token must be 8 bytes, got {}",
                    token.len()
                ));
            }
            assembly.flags.remove(AssemblyFlags::PUBLIC_KEY);
            assembly.identifier = Some(Identity::Token(token));
        }
        "CULTURE" | "LANGUAGE" => {
            assembly.culture = if value.eq_ignore_ascii_case("neutral") {
                None
            } else {
                Some(value.to_string())
            };
        }
        _ => {}
    }

    Ok(())
}

fn parse_hex(value: &str) -> Result<Vec<u8>> {
    hex::decode(value).map_err(|e| malformed_error!("Invalid hex value '{}' - {}", value, e))
}

/// Fails unless only whitespace is left
pub(crate) fn expect_end<S: TypeNameSyntax>(lexer: &mut LexicalReader<'_, S>) -> Result<()> {
    lexer.skip_whitespace();
    if !lexer.has_more_data() {
        return Ok(());
    }

    Err(malformed_error!(
        "Unexpected trailing input '{}' at offset {}",
        lexer.remaining(),
        lexer.pos()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::typename::guard::MAX_RECURSION_DEPTH, metadata::typesystem::ModuleContext,
        ErrorKind,
    };

    fn parse(context: &ModuleContext, input: &str) -> Result<TypeSignature> {
        TypeNameParser::<_, ReflectionSyntax>::new(context, input, None)?.parse_signature()
    }

    fn assembly(input: &str) -> Result<AssemblyRef> {
        let mut lexer = LexicalReader::<ReflectionSyntax>::new(input);
        let asm = read_assembly_ref(&mut lexer)?;
        expect_end(&mut lexer)?;
        Ok(asm)
    }

    #[test]
    fn test_nested_scopes() {
        let context = ModuleContext::new("Test.dll");
        let sig = parse(&context, "N.T+U, Asm").unwrap();

        let leaf = sig.type_def_or_ref().unwrap();
        let leaf = leaf.as_type_ref().unwrap();
        assert_eq!(leaf.name, "U");

        let root = leaf.declaring_type().unwrap();
        assert_eq!(root.namespace, "N");
        assert_eq!(root.name, "T");
        match root.resolution_scope() {
            Some(ResolutionScope::AssemblyRef(asm)) => assert_eq!(asm.name, "Asm"),
            other => panic!("Expected assembly scope, got {:?}", other),
        }
    }

    #[test]
    fn test_dimension_bounds() {
        let context = ModuleContext::new("Test.dll");
        let sig = parse(&context, "T[0..9, -5...-1, 3..., *, ]").unwrap();

        match sig {
            TypeSignature::Array(array) => {
                assert_eq!(array.rank, 5);
                assert_eq!(array.lower_bounds, vec![0, -5, 3]);
                assert_eq!(array.sizes, vec![10, 5]);
            }
            other => panic!("Expected Array, got {:?}", other),
        }
    }

    #[test]
    fn test_dimension_bounds_prefix_only() {
        let context = ModuleContext::new("Test.dll");
        let sig = parse(&context, "T[,0..4]").unwrap();

        match sig {
            TypeSignature::Array(array) => {
                assert_eq!(array.rank, 2);
                assert!(array.lower_bounds.is_empty());
                assert!(array.sizes.is_empty());
            }
            other => panic!("Expected Array, got {:?}", other),
        }
    }

    #[test]
    fn test_dimension_bound_errors() {
        let context = ModuleContext::new("Test.dll");

        let err = parse(&context, "T[5..1]").unwrap_err();
        assert!(matches!(err, Error::InvalidArrayBound { lower: 5, upper: 1 }));

        let err = parse(&context, "T[-1..-3]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArrayBound);

        let err = parse(&context, "T[0..536870911]").unwrap_err();
        assert!(matches!(err, Error::InvalidArraySize(0x2000_0000)));

        assert!(parse(&context, "T[0..536870910]").is_ok());
        assert!(parse(&context, "T[-1..536870909]").is_ok());
        assert_eq!(
            parse(&context, "T[5]").unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
        assert_eq!(
            parse(&context, "T[0.5]").unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
        assert_eq!(
            parse(&context, "T[0..]").unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
    }

    #[test]
    fn test_generic_variable_with_suffix_and_assembly() {
        let context = ModuleContext::new("Test.dll");
        let sig = parse(&context, "!!2[], Ignored").unwrap();

        assert_eq!(
            sig,
            TypeSignature::SzArray(Box::new(TypeSignature::GenericParamMethod(2)))
        );
    }

    #[test]
    fn test_unbracketed_generic_arguments() {
        let context = ModuleContext::new("Test.dll");
        let sig = parse(&context, "N.Pair`2[A, !0], Asm").unwrap();

        match sig {
            TypeSignature::GenericInst(_, args) => {
                assert_eq!(args.len(), 2);
                assert_eq!(args[1], TypeSignature::GenericParamType(0));
                let arg = args[0].type_def_or_ref().unwrap();
                let arg = arg.as_type_ref().unwrap();
                // Unbracketed arguments never carry their own qualifier
                assert_eq!(arg.defining_assembly().unwrap().name, "<<<CURRENT_ASSEMBLY>>>");
            }
            other => panic!("Expected GenericInst, got {:?}", other),
        }
    }

    #[test]
    fn test_read_assembly_ref_keys() {
        let asm = assembly(
            "MyAsm, version=1.2.3.4, CULTURE=de-DE, PublicKeyToken=b77a5c561934e089, Retargetable=yes, ContentType=WindowsRuntime",
        )
        .unwrap();

        assert_eq!(asm.name, "MyAsm");
        assert_eq!(asm.version, AssemblyVersion::new(1, 2, 3, 4));
        assert_eq!(asm.culture.as_deref(), Some("de-DE"));
        assert_eq!(
            asm.identifier,
            Some(Identity::Token(hex::decode("b77a5c561934e089").unwrap()))
        );
        assert!(asm.flags.contains(AssemblyFlags::RETARGETABLE));
        assert!(asm
            .flags
            .contains(AssemblyFlags::CONTENT_TYPE_WINDOWS_RUNTIME));
        assert!(!asm.flags.contains(AssemblyFlags::PUBLIC_KEY));
    }

    #[test]
    fn test_read_assembly_ref_public_key() {
        let asm = assembly("Signed, PublicKey=00000000000000000400000000000000").unwrap();
        assert!(asm.flags.contains(AssemblyFlags::PUBLIC_KEY));
        assert_eq!(
            asm.public_key_token().map(hex::encode),
            Some("b77a5c561934e089".to_string())
        );

        let asm = assembly("Unsigned, PublicKey=null, Language=neutral").unwrap();
        assert_eq!(asm.identifier, Some(Identity::PubKey(vec![])));
        assert!(!asm.flags.contains(AssemblyFlags::PUBLIC_KEY));
        assert!(asm.culture.is_none());
    }

    #[test]
    fn test_read_assembly_ref_lenient() {
        let asm = assembly("Asm, Foo, Version=1.0.0.0, Unknown=Value,, ").unwrap();
        assert_eq!(asm.version, AssemblyVersion::new(1, 0, 0, 0));
        assert!(asm.identifier.is_none());
    }

    #[test]
    fn test_read_assembly_ref_errors() {
        assert_eq!(
            assembly("Asm, PublicKeyToken=b77a5c").unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
        assert_eq!(
            assembly("Asm, PublicKeyToken=zz7a5c561934e089")
                .unwrap_err()
                .kind(),
            ErrorKind::MalformedSyntax
        );
        assert_eq!(
            assembly("Asm, Version=x").unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );

        let err = assembly("Asm, Version=1.99999999999").unwrap_err();
        assert!(matches!(err, Error::IntegerOverflow(15)));
    }

    #[test]
    fn test_read_assembly_ref_requires_separator() {
        // A key without a value still needs ',' before the next key
        assert_eq!(
            assembly("Asm, Foo Bar=1").unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
        assert_eq!(
            assembly("Asm, Version=1.0 Culture=de").unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );

        let context = ModuleContext::new("Test.dll");
        assert_eq!(
            parse(&context, "T, Asm, Foo Bar=1").unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
        assert_eq!(
            parse(&context, "L`1[[T, Asm, Foo Bar=1]]").unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
    }

    #[test]
    fn test_suffixes_count_towards_depth() {
        let context = ModuleContext::new("Test.dll");

        let input = format!("T{}", "*".repeat(MAX_RECURSION_DEPTH - 1));
        assert!(parse(&context, &input).is_ok());

        let input = format!("T{}", "*".repeat(MAX_RECURSION_DEPTH));
        assert!(matches!(
            parse(&context, &input),
            Err(Error::RecursionLimit(MAX_RECURSION_DEPTH))
        ));

        // Suffixes of the enclosing type count for its generic arguments
        let input = format!("L`1{}[[A{}]]", "[]".repeat(60), "*".repeat(60));
        assert_eq!(
            parse(&context, &input).unwrap_err().kind(),
            ErrorKind::StackDepthExceeded
        );
    }

    #[test]
    fn test_trailing_input() {
        let context = ModuleContext::new("Test.dll");
        assert_eq!(
            parse(&context, "T]").unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
        assert!(parse(&context, "  T  ").is_ok());

        let err = parse(&context, "T]x").unwrap_err();
        assert!(matches!(err, Error::Malformed { ref message, .. } if message.contains("']x'")));
    }

    #[test]
    fn test_length_limit() {
        let context = ModuleContext::new("Test.dll");
        let input = "A".repeat(MAX_TYPE_NAME_LENGTH + 1);
        assert_eq!(
            parse(&context, &input).unwrap_err().kind(),
            ErrorKind::MalformedSyntax
        );
    }
}
