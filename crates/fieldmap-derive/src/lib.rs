use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    Data, DeriveInput, Field, Fields, GenericArgument, Ident, ImplItem, ItemImpl, LitStr,
    PathArguments, Type, Visibility, parse_macro_input,
};

/// Derive macro implementing `fieldmap_core::reflect::Reflect`.
///
/// Every `pub` field becomes a mappable field whose record key is the
/// PascalCase form of its name (`custom_identifier` is `CustomIdentifier`).
/// Private fields are invisible to mapping.
///
/// Struct attributes:
///
/// - `#[reflect(declarative)]` (default): only fields carrying
///   `#[mappable(...)]` are mapped; other `pub` fields are skipped when a
///   record names them.
/// - `#[reflect(inferred)]`: every `pub` field is mapped, typed by its Rust
///   type.
/// - `#[reflect(name = "...")]`: type name used in errors.
///
/// Field attributes:
///
/// - `#[mappable(integer | decimal | string | datetime | boolean [, required])]`:
///   the kind must match the field type (`i32`, `Decimal`, `String`,
///   `NaiveDateTime`, `bool`, optionally inside `Option`).
/// - `#[reflect(rename = "...")]`: record key override.
///
/// The struct must implement `Default`.
///
/// # Example
///
/// ```ignore
/// #[derive(Default, Reflect)]
/// pub struct Order {
///     #[mappable(integer, required)]
///     pub order_id: i32,
///     #[mappable(string)]
///     pub note: Option<String>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect, mappable))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Attribute macro listing the marked constants of an inherent `impl`.
///
/// Every `pub const` of type `Self` in the block is marked. The macro keeps
/// the block as written and adds a `MARKED_VALUES` constant plus an
/// implementation of `fieldmap_core::marked::MarkedValues`, both listing the
/// constants in declaration order.
#[proc_macro_attribute]
pub fn marked_values(args: TokenStream, item: TokenStream) -> TokenStream {
    let args = TokenStream2::from(args);
    if !args.is_empty() {
        return syn::Error::new_spanned(args, "#[marked_values] takes no arguments")
            .to_compile_error()
            .into();
    }
    let item = parse_macro_input!(item as ItemImpl);
    match marked_values_impl(&item) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Declarative,
    Inferred,
}

struct FieldSpec<'a> {
    field: &'a Field,
    key: String,
    nullable: bool,
    static_type: StaticKind,
    mappable: Option<(Declared, bool)>,
}

/// Semantic type named in `#[mappable(...)]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Declared {
    Integer,
    Decimal,
    String,
    DateTime,
    Boolean,
}

impl Declared {
    fn from_path(path: &syn::Path) -> Option<Self> {
        let kind = if path.is_ident("integer") {
            Declared::Integer
        } else if path.is_ident("decimal") {
            Declared::Decimal
        } else if path.is_ident("string") {
            Declared::String
        } else if path.is_ident("datetime") {
            Declared::DateTime
        } else if path.is_ident("boolean") {
            Declared::Boolean
        } else {
            return None;
        };
        Some(kind)
    }

    fn keyword(self) -> &'static str {
        match self {
            Declared::Integer => "integer",
            Declared::Decimal => "decimal",
            Declared::String => "string",
            Declared::DateTime => "datetime",
            Declared::Boolean => "boolean",
        }
    }

    /// Whether a field of Rust type `kind` can hold this semantic type.
    fn accepts(self, kind: &StaticKind) -> bool {
        matches!(
            (self, kind),
            (Declared::Integer, StaticKind::Int32)
                | (Declared::Decimal, StaticKind::Decimal)
                | (Declared::String, StaticKind::String)
                | (Declared::DateTime, StaticKind::DateTime)
                | (Declared::Boolean, StaticKind::Bool)
        )
    }

    fn tokens(self) -> TokenStream2 {
        match self {
            Declared::Integer => quote! { ::fieldmap_core::value::SemanticType::Integer },
            Declared::Decimal => quote! { ::fieldmap_core::value::SemanticType::Decimal },
            Declared::String => quote! { ::fieldmap_core::value::SemanticType::String },
            Declared::DateTime => quote! { ::fieldmap_core::value::SemanticType::DateTime },
            Declared::Boolean => quote! { ::fieldmap_core::value::SemanticType::Boolean },
        }
    }
}

enum StaticKind {
    Int32,
    Decimal,
    Bool,
    DateTime,
    String,
    Other(String),
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Reflect does not support generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Reflect only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Reflect only supports structs",
            ));
        }
    };

    let mut mode = Mode::Declarative;
    let mut type_name = name.to_string();
    for attr in &input.attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("declarative") {
                mode = Mode::Declarative;
            } else if meta.path.is_ident("inferred") {
                mode = Mode::Inferred;
            } else if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                type_name = value.value();
            } else {
                return Err(meta.error("expected `declarative`, `inferred` or `name = \"...\"`"));
            }
            Ok(())
        })?;
    }

    let mut specs = Vec::new();
    let mut seen = HashSet::new();
    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let spec = field_spec(field, ident)?;
        if !matches!(field.vis, Visibility::Public(_)) {
            if spec.mappable.is_some() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "#[mappable] requires a `pub` field",
                ));
            }
            continue;
        }
        if mode == Mode::Inferred && spec.mappable.is_some() {
            return Err(syn::Error::new_spanned(
                ident,
                "#[mappable] has no effect on #[reflect(inferred)] types",
            ));
        }
        if !seen.insert(spec.key.clone()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate field key '{}'", spec.key),
            ));
        }
        specs.push(spec);
    }

    let discovery = match mode {
        Mode::Declarative => quote! { ::fieldmap_core::reflect::Discovery::Declarative },
        Mode::Inferred => quote! { ::fieldmap_core::reflect::Discovery::Inferred },
    };

    let infos = specs.iter().map(field_info_tokens);
    let set_arms = specs.iter().map(|spec| {
        let key = &spec.key;
        let ident = &spec.field.ident;
        match &spec.static_type {
            StaticKind::Other(rust_type) => quote! {
                #key => ::core::result::Result::Err(
                    ::fieldmap_core::reflect::SlotError::TypeMismatch {
                        expected: #rust_type,
                        found: value.semantic_type(),
                    },
                ),
            },
            _ => quote! {
                #key => {
                    self.#ident = ::fieldmap_core::value::FromValue::from_value(value)?;
                    ::core::result::Result::Ok(())
                }
            },
        }
    });
    let get_arms = specs.iter().map(|spec| {
        let key = &spec.key;
        let ident = &spec.field.ident;
        match &spec.static_type {
            StaticKind::Other(_) => quote! {
                #key => ::core::result::Result::Ok(::core::option::Option::None),
            },
            _ => quote! {
                #key => ::core::result::Result::Ok(
                    ::fieldmap_core::value::ToValue::to_value(&self.#ident),
                ),
            },
        }
    });
    let bindings = specs.iter().map(binding_tokens);

    Ok(quote! {
        impl ::fieldmap_core::reflect::Reflect for #name {
            const TYPE_NAME: &'static str = #type_name;
            const DISCOVERY: ::fieldmap_core::reflect::Discovery = #discovery;

            fn field_infos() -> &'static [::fieldmap_core::reflect::FieldInfo] {
                const FIELDS: &[::fieldmap_core::reflect::FieldInfo] = &[#(#infos),*];
                FIELDS
            }

            fn set_field(
                &mut self,
                name: &str,
                value: ::fieldmap_core::Value,
            ) -> ::core::result::Result<(), ::fieldmap_core::reflect::SlotError> {
                match name {
                    #(#set_arms)*
                    _ => ::core::result::Result::Err(
                        ::fieldmap_core::reflect::SlotError::NoSuchField(name.to_string()),
                    ),
                }
            }

            fn get_field(
                &self,
                name: &str,
            ) -> ::core::result::Result<
                ::core::option::Option<::fieldmap_core::Value>,
                ::fieldmap_core::reflect::SlotError,
            > {
                match name {
                    #(#get_arms)*
                    _ => ::core::result::Result::Err(
                        ::fieldmap_core::reflect::SlotError::NoSuchField(name.to_string()),
                    ),
                }
            }

            fn field_bindings() -> ::std::vec::Vec<::fieldmap_core::reflect::FieldBinding<Self>> {
                ::std::vec![#(#bindings),*]
            }
        }
    })
}

fn field_spec<'a>(field: &'a Field, ident: &Ident) -> Result<FieldSpec<'a>, syn::Error> {
    let mut key = pascal_case(&ident.unraw().to_string());
    let mut mappable = None;

    for attr in &field.attrs {
        if attr.path().is_ident("reflect") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    key = value.value();
                    Ok(())
                } else {
                    Err(meta.error("expected `rename = \"...\"`"))
                }
            })?;
        } else if attr.path().is_ident("mappable") {
            let mut semantic_type = None;
            let mut required = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("required") {
                    required = true;
                    return Ok(());
                }
                let Some(kind) = Declared::from_path(&meta.path) else {
                    return Err(meta.error(
                        "expected `integer`, `decimal`, `string`, `datetime`, `boolean` or `required`",
                    ));
                };
                if semantic_type.is_some() {
                    return Err(meta.error("semantic type given twice"));
                }
                semantic_type = Some(kind);
                Ok(())
            })?;
            let semantic_type = semantic_type.ok_or_else(|| {
                syn::Error::new_spanned(attr, "missing semantic type in #[mappable(...)]")
            })?;
            mappable = Some((semantic_type, required));
        }
    }

    let (nullable, inner) = match option_inner(&field.ty) {
        Some(inner) => (true, inner),
        None => (false, &field.ty),
    };
    let static_type = static_kind(inner);

    if let Some((declared, _)) = mappable
        && !declared.accepts(&static_type)
    {
        return Err(syn::Error::new_spanned(
            &field.ty,
            format!(
                "#[mappable({})] does not fit a field of type `{}`",
                declared.keyword(),
                quote!(#inner).to_string().replace(' ', "")
            ),
        ));
    }

    Ok(FieldSpec {
        field,
        key,
        nullable,
        static_type,
        mappable,
    })
}

fn field_info_tokens(spec: &FieldSpec<'_>) -> TokenStream2 {
    let key = &spec.key;
    let nullable = spec.nullable;
    let static_type = match &spec.static_type {
        StaticKind::Int32 => quote! { ::fieldmap_core::reflect::StaticType::Int32 },
        StaticKind::Decimal => quote! { ::fieldmap_core::reflect::StaticType::Decimal },
        StaticKind::Bool => quote! { ::fieldmap_core::reflect::StaticType::Bool },
        StaticKind::DateTime => quote! { ::fieldmap_core::reflect::StaticType::DateTime },
        StaticKind::String => quote! { ::fieldmap_core::reflect::StaticType::String },
        StaticKind::Other(rust_type) => {
            quote! { ::fieldmap_core::reflect::StaticType::Other(#rust_type) }
        }
    };
    let attribute = match &spec.mappable {
        Some((declared, required)) => {
            let semantic_type = declared.tokens();
            quote! {
                ::core::option::Option::Some(::fieldmap_core::reflect::MappableAttribute {
                    semantic_type: #semantic_type,
                    required: #required,
                })
            }
        }
        None => quote! { ::core::option::Option::None },
    };
    quote! {
        ::fieldmap_core::reflect::FieldInfo {
            name: #key,
            static_type: #static_type,
            nullable: #nullable,
            attribute: #attribute,
        }
    }
}

fn binding_tokens(spec: &FieldSpec<'_>) -> TokenStream2 {
    let key = &spec.key;
    let ident = &spec.field.ident;
    let (get, set) = match &spec.static_type {
        StaticKind::Other(rust_type) => (
            quote! { |_: &Self| ::core::option::Option::None },
            quote! {
                |_: &mut Self, value: ::fieldmap_core::Value| {
                    ::core::result::Result::Err(::fieldmap_core::reflect::SlotError::TypeMismatch {
                        expected: #rust_type,
                        found: value.semantic_type(),
                    })
                }
            },
        ),
        _ => (
            quote! { |target: &Self| ::fieldmap_core::value::ToValue::to_value(&target.#ident) },
            quote! {
                |target: &mut Self, value: ::fieldmap_core::Value| {
                    target.#ident = ::fieldmap_core::value::FromValue::from_value(value)?;
                    ::core::result::Result::Ok(())
                }
            },
        ),
    };
    quote! {
        ::fieldmap_core::reflect::FieldBinding {
            name: #key,
            get: #get,
            set: #set,
        }
    }
}

/// `T` for a field of type `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

fn static_kind(ty: &Type) -> StaticKind {
    let ident = match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            type_path.path.segments.last().map(|seg| seg.ident.to_string())
        }
        _ => None,
    };
    match ident.as_deref() {
        Some("i32") => StaticKind::Int32,
        Some("bool") => StaticKind::Bool,
        Some("String") => StaticKind::String,
        Some("Decimal") => StaticKind::Decimal,
        Some("NaiveDateTime") => StaticKind::DateTime,
        _ => StaticKind::Other(quote!(#ty).to_string().replace(' ', "")),
    }
}

/// `custom_identifier` becomes `CustomIdentifier`.
fn pascal_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

fn marked_values_impl(item: &ItemImpl) -> Result<TokenStream2, syn::Error> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[marked_values] applies to inherent impl blocks only",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "#[marked_values] does not support generic impl blocks",
        ));
    }

    let self_ty = &item.self_ty;
    let marked = marked_constants(item);

    Ok(quote! {
        #item

        impl #self_ty {
            /// Marked constants in declaration order.
            pub const MARKED_VALUES: &'static [Self] = &[#(Self::#marked),*];
        }

        impl ::fieldmap_core::marked::MarkedValues for #self_ty {
            fn items() -> &'static [Self] {
                Self::MARKED_VALUES
            }
        }
    })
}

/// Public constants of type `Self` (or the impl's own type), in order.
fn marked_constants(item: &ItemImpl) -> Vec<&Ident> {
    let self_ty = &item.self_ty;
    let self_name = quote!(#self_ty).to_string();
    item.items
        .iter()
        .filter_map(|impl_item| match impl_item {
            ImplItem::Const(constant) if matches!(constant.vis, Visibility::Public(_)) => {
                let ty = &constant.ty;
                let ty_name = quote!(#ty).to_string();
                (ty_name == "Self" || ty_name == self_name).then_some(&constant.ident)
            }
            _ => None,
        })
        .collect()
}
