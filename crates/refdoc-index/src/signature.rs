//! Declaration-style signatures.
//!
//! Modifiers follow the PSR-12 order: `abstract`/`final` before the
//! visibility, `static` after it.

use std::fmt::Write;

use refdoc_reflect::{ClassKind, Visibility};

use crate::wrapper::{
    ClassElementWrapper, ClassWrapper, ConstantWrapper, FunctionWrapper, HasParameters,
    MemberFilter, MethodWrapper, ParameterWrapper, PropertyWrapper, ReflectionWrapper,
};

const INDENT: &str = "    ";

/// `[type ][&][...]$name[ = default]`
pub(crate) fn parameter(param: &ParameterWrapper) -> String {
    let mut out = String::new();
    if let Some(type_hint) = &param.type_hint {
        out.push_str(type_hint);
        out.push(' ');
    }
    if param.is_by_reference {
        out.push('&');
    }
    if param.is_variadic {
        out.push_str("...");
    }
    out.push('$');
    out.push_str(&param.name);
    if let Some(default) = &param.default_value {
        out.push_str(" = ");
        out.push_str(default);
    }
    out
}

fn parameter_list(params: &[ParameterWrapper]) -> String {
    params.iter().map(parameter).collect::<Vec<_>>().join(", ")
}

/// `[abstract ][final ]<visibility> [static ]function name(params)[: ret]`
#[must_use]
pub fn method(method: &MethodWrapper) -> String {
    let mut out = String::new();
    if method.is_abstract() {
        out.push_str("abstract ");
    }
    if method.is_final() {
        out.push_str("final ");
    }
    push_visibility(&mut out, method.visibility(), method.is_static());
    let _ = write!(
        out,
        "function {}({})",
        method.name(),
        parameter_list(method.parameters())
    );
    if let Some(ret) = &method.reflected().return_type {
        let _ = write!(out, ": {ret}");
    }
    out
}

/// `<visibility> [static ][readonly ][type ]$name[ = default]`
#[must_use]
pub fn property(property: &PropertyWrapper) -> String {
    let mut out = String::new();
    push_visibility(&mut out, property.visibility(), property.is_static());
    if property.is_readonly() {
        out.push_str("readonly ");
    }
    if let Some(type_hint) = &property.reflected().type_hint {
        out.push_str(type_hint);
        out.push(' ');
    }
    out.push('$');
    out.push_str(property.name());
    if let Some(default) = property.default_value() {
        let _ = write!(out, " = {default}");
    }
    out
}

/// `<visibility> const NAME[ = value]`
#[must_use]
pub fn constant(constant: &ConstantWrapper) -> String {
    let mut out = String::new();
    push_visibility(&mut out, constant.visibility(), false);
    out.push_str("const ");
    out.push_str(constant.name());
    if let Some(value) = constant.value() {
        let _ = write!(out, " = {value}");
    }
    out
}

/// `function name(params)[: ret]`
pub(crate) fn function(function: &FunctionWrapper) -> String {
    let mut out = format!(
        "function {}({})",
        function.short_name(),
        parameter_list(function.parameters())
    );
    if let Some(ret) = &function.reflected().return_type {
        let _ = write!(out, ": {ret}");
    }
    out
}

fn push_visibility(out: &mut String, visibility: Visibility, is_static: bool) {
    out.push_str(visibility.keyword());
    out.push(' ');
    if is_static {
        out.push_str("static ");
    }
}

/// Heritage name as written inside the class's namespace.
fn relative_name(name: &str, namespace: &str) -> String {
    let name = name.trim_start_matches('\\');
    match name.rsplit_once('\\') {
        Some((ns, short)) if ns.eq_ignore_ascii_case(namespace) => short.to_owned(),
        None if namespace.is_empty() => name.to_owned(),
        _ => format!("\\{name}"),
    }
}

/// Declaration header, e.g. `final class Invoice extends Document implements \Countable`.
#[must_use]
pub fn class_header(class: &ClassWrapper) -> String {
    let mut out = String::new();
    let kind = class.class_kind();
    if kind == ClassKind::Class {
        if class.is_final() {
            out.push_str("final ");
        }
        if class.is_abstract() {
            out.push_str("abstract ");
        }
    }
    let _ = write!(out, "{} {}", kind.keyword(), class.short_name());

    let namespace = class.namespace();
    let interfaces: Vec<String> = class
        .interfaces()
        .iter()
        .map(|i| relative_name(i, namespace))
        .collect();

    match kind {
        ClassKind::Interface => {
            if !interfaces.is_empty() {
                let _ = write!(out, " extends {}", interfaces.join(", "));
            }
        }
        ClassKind::Class | ClassKind::Enum => {
            if let Some(parent) = class.parent() {
                let _ = write!(out, " extends {}", relative_name(parent, namespace));
            }
            if !interfaces.is_empty() {
                let _ = write!(out, " implements {}", interfaces.join(", "));
            }
        }
        ClassKind::Trait => {}
    }
    out
}

/// Full class outline: header, then one body section per member group.
pub(crate) fn class(class: &ClassWrapper, only_api: bool) -> String {
    let (constants, properties, methods) = if only_api {
        (
            class.all_api_constants(),
            class.all_api_properties(),
            class.all_api_methods(),
        )
    } else {
        let filter = MemberFilter {
            private: false,
            ..MemberFilter::ALL
        };
        (
            class.all_user_defined_constants(filter),
            class.all_user_defined_properties(filter),
            class.all_user_defined_methods(filter),
        )
    };

    let (static_properties, properties): (Vec<_>, Vec<_>) =
        properties.into_iter().partition(|p| p.is_static());
    let (static_methods, methods): (Vec<_>, Vec<_>) =
        methods.into_iter().partition(|m| m.is_static());

    let sections: [Vec<String>; 5] = [
        constants.into_iter().map(constant).collect(),
        static_properties.into_iter().map(property).collect(),
        properties.into_iter().map(property).collect(),
        static_methods.into_iter().map(method).collect(),
        methods.into_iter().map(method).collect(),
    ];

    let mut out = class_header(class);
    out.push_str("\n{\n");
    let mut first = true;
    for section in sections.iter().filter(|s| !s.is_empty()) {
        if !first {
            out.push('\n');
        }
        first = false;
        for line in section {
            let _ = writeln!(out, "{INDENT}{line};");
        }
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use refdoc_reflect::{
        ReflectedClass, ReflectedConstant, ReflectedMethod, ReflectedParameter,
        ReflectedProperty,
    };

    use super::*;
    use crate::api::HasTagApi;
    use crate::wrapper::CallableRef;

    fn wrap(reflected: ReflectedClass) -> ClassWrapper {
        let mut class = ClassWrapper::from_reflection(reflected);
        class.apply_policy(&HasTagApi);
        class
    }

    fn invoice() -> ClassWrapper {
        wrap(
            ReflectedClass::new("Acme\\Billing\\Invoice", ClassKind::Class)
                .final_class()
                .with_parent("Acme\\Billing\\Document")
                .with_interface("JsonSerializable")
                .with_interface("Acme\\Billing\\Payable")
                .with_constant(
                    ReflectedConstant::new("VERSION", "Acme\\Billing\\Invoice")
                        .with_value("2")
                        .with_doc("/** @api */"),
                )
                .with_property(
                    ReflectedProperty::new("count", "Acme\\Billing\\Invoice")
                        .static_property()
                        .with_type("int")
                        .with_default("0"),
                )
                .with_property(
                    ReflectedProperty::new("number", "Acme\\Billing\\Invoice")
                        .readonly()
                        .with_type("string")
                        .with_doc("/** @api */"),
                )
                .with_property(
                    ReflectedProperty::new("secret", "Acme\\Billing\\Invoice")
                        .with_visibility(Visibility::Private),
                )
                .with_method(
                    ReflectedMethod::new("create", "Acme\\Billing\\Invoice")
                        .static_method()
                        .with_return_type("self")
                        .with_doc("/** @api */"),
                )
                .with_method(
                    ReflectedMethod::new("total", "Acme\\Billing\\Invoice")
                        .with_parameter(
                            ReflectedParameter::new("currency", 0)
                                .with_type("?string")
                                .with_default("null"),
                        )
                        .with_return_type("int")
                        .with_doc("/** @api */"),
                )
                .with_method(
                    ReflectedMethod::new("recalculate", "Acme\\Billing\\Invoice")
                        .with_visibility(Visibility::Protected),
                ),
        )
    }

    #[test]
    fn test_class_signature_full() {
        let signature = invoice().signature(false);

        assert_eq!(
            signature,
            "final class Invoice extends Document implements \\JsonSerializable, Payable\n\
             {\n\
             \x20   public const VERSION = 2;\n\
             \n\
             \x20   public static int $count = 0;\n\
             \n\
             \x20   public readonly string $number;\n\
             \n\
             \x20   public static function create(): self;\n\
             \n\
             \x20   protected function recalculate();\n\
             \x20   public function total(?string $currency = null): int;\n\
             }"
        );
    }

    #[test]
    fn test_class_signature_only_api_omits_empty_sections() {
        let signature = invoice().signature(true);

        assert_eq!(
            signature,
            "final class Invoice extends Document implements \\JsonSerializable, Payable\n\
             {\n\
             \x20   public const VERSION = 2;\n\
             \n\
             \x20   public readonly string $number;\n\
             \n\
             \x20   public static function create(): self;\n\
             \n\
             \x20   public function total(?string $currency = null): int;\n\
             }"
        );
    }

    #[test]
    fn test_final_not_shown_for_non_class_kinds() {
        let reflected = ReflectedClass::new("Acme\\Shape", ClassKind::Enum)
            .final_class()
            .with_interface("Acme\\Named");

        let header = class_header(&wrap(reflected));

        assert_eq!(header, "enum Shape implements Named");
    }

    #[test]
    fn test_interface_extends_interfaces() {
        let header = class_header(&wrap(
            ReflectedClass::new("Acme\\Repository", ClassKind::Interface)
                .with_interface("Countable")
                .with_interface("Acme\\Reader"),
        ));

        assert_eq!(header, "interface Repository extends \\Countable, Reader");
    }

    #[test]
    fn test_abstract_class_header() {
        let header = class_header(&wrap(
            ReflectedClass::new("Acme\\Base", ClassKind::Class).abstract_class(),
        ));

        assert_eq!(header, "abstract class Base");
    }

    #[test]
    fn test_empty_class_body() {
        let signature = wrap(ReflectedClass::new("Acme\\Empty", ClassKind::Trait)).signature(false);

        assert_eq!(signature, "trait Empty\n{\n}");
    }

    #[test]
    fn test_method_modifier_order() {
        let class = wrap(
            ReflectedClass::new("Acme\\Base", ClassKind::Class).with_method(
                ReflectedMethod::new("make", "Acme\\Base")
                    .abstract_method()
                    .static_method()
                    .with_visibility(Visibility::Protected),
            ),
        );

        assert_eq!(
            method(&class.methods()[0]),
            "abstract protected static function make()"
        );
    }

    #[test]
    fn test_parameter_declaration() {
        let param = ParameterWrapper::new(
            CallableRef::Function {
                name: "Acme\\f".to_owned(),
            },
            &ReflectedParameter::new("values", 0)
                .with_type("int")
                .by_reference()
                .variadic(),
            None,
        );

        assert_eq!(parameter(&param), "int &...$values");
    }
}
