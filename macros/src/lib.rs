//! Derive macros for the Todomind reducer architecture
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates classification and naming helpers for
//!   action enums that mix commands (user intent) and events (applied facts)
//!
//! # Example
//!
//! ```ignore
//! use todomind_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[command]
//!     AddTask,
//!
//!     #[event]
//!     TaskAdded { description: String },
//! }
//!
//! assert!(TodoAction::AddTask.is_command());
//! assert_eq!(TodoAction::AddTask.name(), "AddTask");
//! assert_eq!(
//!     TodoAction::TaskAdded { description: "x".into() }.event_type(),
//!     "TaskAdded.v1"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Variant};

/// How a variant is classified by its attributes
#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    Command,
    Event,
    Plain,
}

/// Derive macro for Action enums
///
/// Generates on the enum:
/// - `is_command()` - true for variants marked `#[command]`
/// - `is_event()` - true for variants marked `#[event]`
/// - `event_type()` - `"<Variant>.v1"` for events, `"unknown"` otherwise
/// - `name()` - the variant name, for every variant (used in log fields)
///
/// Unmarked variants are neither commands nor events.
///
/// # Errors
///
/// Produces a compile error if applied to a non-enum type, or if a variant
/// carries both `#[command]` and `#[event]`.
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_action(&input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand_action(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums",
        ));
    };

    let mut is_command_arms = Vec::new();
    let mut is_event_arms = Vec::new();
    let mut event_type_arms = Vec::new();
    let mut name_arms = Vec::new();

    for variant in &data_enum.variants {
        let kind = classify(variant)?;
        let pattern = variant_pattern(variant);
        let variant_name = variant.ident.to_string();

        match kind {
            Kind::Command => is_command_arms.push(quote! { #pattern => true, }),
            Kind::Event => {
                let type_name = format!("{variant_name}.v1");
                is_event_arms.push(quote! { #pattern => true, });
                event_type_arms.push(quote! { #pattern => #type_name, });
            },
            Kind::Plain => {},
        }

        name_arms.push(quote! { #pattern => #variant_name, });
    }

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns true if this action is a command
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#is_command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#is_event_arms)*
                    _ => false,
                }
            }

            /// Returns the versioned event type name
            ///
            /// Only events have type names. Other variants return "unknown".
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn event_type(&self) -> &'static str {
                match self {
                    #(#event_type_arms)*
                    _ => "unknown",
                }
            }

            /// Returns the variant name
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }
    })
}

fn classify(variant: &Variant) -> syn::Result<Kind> {
    let is_command = has_attribute(&variant.attrs, "command");
    let is_event = has_attribute(&variant.attrs, "event");

    match (is_command, is_event) {
        (true, true) => Err(syn::Error::new_spanned(
            variant,
            "Variant cannot be both #[command] and #[event]",
        )),
        (true, false) => Ok(Kind::Command),
        (false, true) => Ok(Kind::Event),
        (false, false) => Ok(Kind::Plain),
    }
}

/// Pattern matching any value of `variant`, whatever its field shape
fn variant_pattern(variant: &Variant) -> TokenStream2 {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
