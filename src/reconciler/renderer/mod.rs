//! Artifact rendering
//!
//! Produces the complete [`ArtifactSet`] of a pass: one artifact per member
//! and service plus the cluster-wide identity and predefined-object files.
//! Rendering is pure; identical inputs give byte-identical output whatever
//! order the members were retrieved in.

pub mod monitor;
pub mod params;
pub mod template;

use tracing::{debug, warn};

use crate::domain::entities::{ArtifactSet, Member};
use crate::error::Result;
use crate::reconciler::credentials::CredentialBundle;
use crate::reconciler::resolver::EffectiveConfig;
use crate::reconciler::topology::TopologySnapshot;

use monitor::MonitorConfig;
use params::RenderContext;

pub const DEFAULT_CA_FILE_PATH: &str = "/etc/ssl/certs/kubernetes/ca-bundle.crt";
pub const KEYSTONE_AUTH_KEY: &str = "contrail-keystone-auth.conf";
pub const PREDEFINED_OBJECTS_KEY: &str = "predef.json";

#[derive(Debug, Clone)]
pub struct RendererSettings {
    /// CA bundle path written into every TLS setting
    pub ca_file_path: String,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            ca_file_path: DEFAULT_CA_FILE_PATH.to_string(),
        }
    }
}

/// Inputs of one render
pub struct RenderRequest<'a> {
    pub cluster_name: &'a str,
    pub namespace: &'a str,
    pub config: &'a EffectiveConfig,
    pub topology: &'a TopologySnapshot,
    pub credentials: &'a CredentialBundle,
    pub members: &'a [Member],
}

pub struct ArtifactRenderer {
    settings: RendererSettings,
}

impl ArtifactRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    pub fn render(&self, request: &RenderRequest<'_>) -> Result<ArtifactSet> {
        let ctx = RenderContext::new(
            request.config,
            request.topology,
            request.credentials,
            &self.settings.ca_file_path,
        );

        let mut members: Vec<&Member> = request.members.iter().collect();
        members.sort_by(|a, b| a.ip.cmp(&b.ip));

        let mut artifacts = ArtifactSet::new();
        for member in members {
            if member.hostname.is_none() {
                warn!(
                    "Member {} has no hostname annotation, using its name",
                    member.name
                );
            }
            self.render_member(&ctx, request, member, &mut artifacts)?;
        }

        artifacts.insert(
            KEYSTONE_AUTH_KEY,
            template::KEYSTONE_AUTH.render(&params::keystone_auth(&ctx))?,
        );
        artifacts.insert(PREDEFINED_OBJECTS_KEY, template::PREDEFINED_OBJECTS);

        debug!(
            "📝 Rendered {} artifacts for {} members",
            artifacts.len(),
            request.members.len()
        );
        Ok(artifacts)
    }

    fn render_member(
        &self,
        ctx: &RenderContext<'_>,
        request: &RenderRequest<'_>,
        member: &Member,
        artifacts: &mut ArtifactSet,
    ) -> Result<()> {
        let ip = member.ip.as_str();

        let monitor = MonitorConfig::for_member(
            request.config,
            member,
            request.cluster_name,
            request.namespace,
        );
        artifacts.insert(format!("monitorconfig.{}.yaml", ip), monitor.to_yaml()?);

        artifacts.insert(
            format!("api.{}", ip),
            template::API.render(&params::api(ctx, member))?,
        );
        artifacts.insert(
            format!("vnc.{}", ip),
            template::VNC.render(&params::vnc(ctx, member))?,
        );
        artifacts.insert(
            format!("devicemanager.{}", ip),
            template::DEVICE_MANAGER.render(&params::device_manager(ctx, member))?,
        );
        artifacts.insert(
            format!("contrail-fabric-ansible.conf.{}", ip),
            template::FABRIC_ANSIBLE.render(&params::fabric_ansible(ctx, member))?,
        );
        artifacts.insert(format!("dnsmasq.{}", ip), template::DNSMASQ);
        artifacts.insert(
            format!("schematransformer.{}", ip),
            template::SCHEMA_TRANSFORMER.render(&params::schema_transformer(ctx, member))?,
        );
        artifacts.insert(
            format!("servicemonitor.{}", ip),
            template::SERVICE_MONITOR.render(&params::service_monitor(ctx, member))?,
        );
        artifacts.insert(
            format!("analyticsapi.{}", ip),
            template::ANALYTICS_API.render(&params::analytics_api(ctx, member))?,
        );
        artifacts.insert(
            format!("collector.{}", ip),
            template::COLLECTOR.render(&params::collector(ctx, member))?,
        );
        artifacts.insert(
            format!("queryengine.{}", ip),
            template::QUERY_ENGINE.render(&params::query_engine(ctx, member))?,
        );

        artifacts.insert(
            format!("nodemanagerconfig.{}", ip),
            template::NODE_MANAGER.render(&params::node_manager(ctx, member, "config"))?,
        );
        artifacts.insert(
            format!("nodemanageranalytics.{}", ip),
            template::NODE_MANAGER.render(&params::node_manager(ctx, member, "analytics"))?,
        );
        Ok(())
    }
}
