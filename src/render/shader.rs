use anyhow::Result;

const SHADER_TEMPLATES: [(&str, &str); 2] = [
    (
        "preview/preview.vert",
        include_str!("../../shaders/preview/preview.vert"),
    ),
    (
        "preview/preview.frag",
        include_str!("../../shaders/preview/preview.frag"),
    ),
];

pub fn create_shader_templates() -> Result<tera::Tera> {
    let mut tera = tera::Tera::default();
    tera.add_raw_templates(SHADER_TEMPLATES)?;

    Ok(tera)
}

pub struct ShaderModulePackage {
    pub vertex_shader_module: wgpu::ShaderModule,
    pub fragment_shader_module: wgpu::ShaderModule,
}

impl ShaderModulePackage {
    pub fn from_templates(
        vertex_template_name: &str,
        fragment_template_name: &str,
        name: &str,
        device: &wgpu::Device,
        tera: &tera::Tera,
        shader_template_config: &ShaderTemplateConfiguration,
    ) -> Result<Self> {
        let shader_template_context = tera::Context::from_serialize(shader_template_config)?;

        let vertex_shader_source =
            tera.render(vertex_template_name, &shader_template_context)?;
        let fragment_shader_source =
            tera.render(fragment_template_name, &shader_template_context)?;

        log::debug!(
            "Creating shader module package {name} from config: {:?}",
            shader_template_config
        );

        Ok(ShaderModulePackage {
            vertex_shader_module: device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{}_VERTEX_SHADER_MODULE", name)),
                source: wgpu::ShaderSource::Wgsl(vertex_shader_source.into()),
            }),
            fragment_shader_module: device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{}_FRAGMENT_SHADER_MODULE", name)),
                source: wgpu::ShaderSource::Wgsl(fragment_shader_source.into()),
            }),
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize)]
pub struct ShaderTemplateConfiguration {
    /// The texture holds a single channel that is broadcast to RGB.
    pub grayscale: bool,
    /// The surface re-encodes to sRGB, so sampled values are converted to linear first.
    pub linearize: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_fragment(config: ShaderTemplateConfiguration) -> String {
        let tera = create_shader_templates().unwrap();
        let context = tera::Context::from_serialize(config).unwrap();

        tera.render("preview/preview.frag", &context).unwrap()
    }

    #[test]
    fn grayscale_broadcasts_red_channel() {
        let source = render_fragment(ShaderTemplateConfiguration {
            grayscale: true,
            linearize: false,
        });

        assert!(source.contains("texel.rrr"));
        assert!(!source.contains("color = vec4<f32>(srgb_to_linear"));
    }

    #[test]
    fn linearize_converts_samples() {
        let source = render_fragment(ShaderTemplateConfiguration {
            grayscale: false,
            linearize: true,
        });

        assert!(!source.contains("texel.rrr"));
        assert!(source.contains("color = vec4<f32>(srgb_to_linear(color.rgb), color.a);"));
    }

    #[test]
    fn vertex_template_renders() {
        let tera = create_shader_templates().unwrap();

        assert!(tera
            .render("preview/preview.vert", &tera::Context::new())
            .unwrap()
            .contains("fn vs_main"));
    }
}
