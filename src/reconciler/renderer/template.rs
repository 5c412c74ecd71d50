//! `${Name}` placeholder substitution for service templates

use crate::error::{AppError, Result};
use crate::reconciler::renderer::params::ServiceParams;

/// A service configuration template compiled into the binary
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pub source: &'static str,
}

pub const API: Template = Template {
    name: "api",
    source: include_str!("../../../templates/api.conf"),
};
pub const VNC: Template = Template {
    name: "vnc",
    source: include_str!("../../../templates/vnc_api_lib.ini"),
};
pub const DEVICE_MANAGER: Template = Template {
    name: "devicemanager",
    source: include_str!("../../../templates/devicemanager.conf"),
};
pub const FABRIC_ANSIBLE: Template = Template {
    name: "fabric-ansible",
    source: include_str!("../../../templates/fabric-ansible.conf"),
};
pub const SCHEMA_TRANSFORMER: Template = Template {
    name: "schematransformer",
    source: include_str!("../../../templates/schematransformer.conf"),
};
pub const SERVICE_MONITOR: Template = Template {
    name: "servicemonitor",
    source: include_str!("../../../templates/servicemonitor.conf"),
};
pub const ANALYTICS_API: Template = Template {
    name: "analyticsapi",
    source: include_str!("../../../templates/analyticsapi.conf"),
};
pub const COLLECTOR: Template = Template {
    name: "collector",
    source: include_str!("../../../templates/collector.conf"),
};
pub const QUERY_ENGINE: Template = Template {
    name: "queryengine",
    source: include_str!("../../../templates/queryengine.conf"),
};
pub const NODE_MANAGER: Template = Template {
    name: "nodemanager",
    source: include_str!("../../../templates/nodemanager.conf"),
};
pub const KEYSTONE_AUTH: Template = Template {
    name: "keystone-auth",
    source: include_str!("../../../templates/keystone-auth.conf"),
};

/// Static content, no placeholders
pub const DNSMASQ: &str = include_str!("../../../templates/dnsmasq.conf");
pub const PREDEFINED_OBJECTS: &str = include_str!("../../../templates/predef.json");

impl Template {
    /// Substitute every `${Name}` with its parameter value.
    ///
    /// Values are inserted verbatim and never rescanned. A placeholder with no
    /// matching parameter, or an unterminated one, is a [`AppError::TemplateError`].
    pub fn render(&self, params: &ServiceParams) -> Result<String> {
        substitute_variables(self.name, self.source, params)
    }
}

fn substitute_variables(name: &str, source: &str, params: &ServiceParams) -> Result<String> {
    let mut result = String::with_capacity(source.len() + 256);
    let mut rest = source;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or_else(|| {
            AppError::TemplateError(format!("template '{}': unterminated placeholder", name))
        })?;
        let key = &after[..end];
        let value = params.get(key).ok_or_else(|| {
            AppError::TemplateError(format!(
                "template '{}': unresolved placeholder ${{{}}}",
                name, key
            ))
        })?;
        result.push_str(value);
        rest = &after[end + 1..];
    }
    result.push_str(rest);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Template = Template {
        name: "sample",
        source: "listen=${HostIP}:${ListenPort}\nlog=${LogLevel}\n",
    };

    #[test]
    fn test_substitutes_every_placeholder() {
        let params = ServiceParams::new()
            .set("HostIP", "10.0.0.1")
            .set("ListenPort", 8082)
            .set("LogLevel", "SYS_NOTICE");
        let rendered = SAMPLE.render(&params).unwrap();
        assert_eq!(rendered, "listen=10.0.0.1:8082\nlog=SYS_NOTICE\n");
    }

    #[test]
    fn test_missing_parameter_is_template_error() {
        let params = ServiceParams::new().set("HostIP", "10.0.0.1");
        let err = SAMPLE.render(&params).unwrap_err();
        match err {
            AppError::TemplateError(message) => assert!(message.contains("${ListenPort}")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = Template {
            name: "nested",
            source: "password=${RabbitmqPassword}",
        };
        let params = ServiceParams::new().set("RabbitmqPassword", "${HostIP}");
        assert_eq!(template.render(&params).unwrap(), "password=${HostIP}");
    }

    #[test]
    fn test_unterminated_placeholder_is_rejected() {
        let template = Template {
            name: "broken",
            source: "listen=${HostIP",
        };
        let params = ServiceParams::new().set("HostIP", "10.0.0.1");
        assert!(template.render(&params).is_err());
    }

    #[test]
    fn test_static_templates_have_no_placeholders() {
        assert!(!DNSMASQ.contains("${"));
        assert!(!PREDEFINED_OBJECTS.contains("${"));
        let predef: serde_json::Value = serde_json::from_str(PREDEFINED_OBJECTS).unwrap();
        assert!(predef["data"].is_array());
    }
}
