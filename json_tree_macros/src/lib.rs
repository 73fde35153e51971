extern crate proc_macro;
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Fields, LitStr, ext::IdentExt, parse_macro_input, parse_quote,
};

/// Derive `json_tree::FromValue` for a struct with named fields, reading each field from the
/// object key of the same name.
#[proc_macro_derive(FromValue)]
pub fn derive_from_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Struct(schema) = &input.data else {
        return Err(Error::new_spanned(
            &input,
            "FromValue can only be derived for structs",
        ));
    };

    let Fields::Named(fields) = &schema.fields else {
        return Err(Error::new_spanned(
            &input,
            "FromValue can only be derived for named field structs",
        ));
    };

    let struct_name = &input.ident;

    // Fields of type `T` are converted, so each `T` must be `FromValue` too
    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::json_tree::FromValue));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let field_inits = fields.named.iter().map(|f| {
        let field_name = f.ident.as_ref().expect("named fields always have an ident");
        let field_type = &f.ty;
        // `r#type` is looked up as "type"
        let key = LitStr::new(&field_name.unraw().to_string(), field_name.span());

        quote! {
            #field_name: <#field_type as ::json_tree::FromValue>::from_field(props.get(#key), #key)?
        }
    });

    Ok(quote! {
        impl #impl_generics ::json_tree::FromValue for #struct_name #ty_generics #where_clause {
            fn from_value(
                value: &::json_tree::JsonValue,
            ) -> ::std::result::Result<Self, ::json_tree::ConvertErr> {
                let props = value.as_object().ok_or_else(|| ::json_tree::ConvertErr::TypeMismatch {
                    expected: "object",
                    found: value.type_name(),
                })?;

                ::std::result::Result::Ok(Self {
                    #(#field_inits),*
                })
            }
        }
    })
}
