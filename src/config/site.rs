use crate::domain::model::{FormKind, PageLayout};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_positive_number, validate_unique,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub site: SiteInfo,
    #[serde(flatten)]
    pub layout: PageLayout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInfo {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CLINIC_NAME})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::{Captures, Regex};
        use std::sync::LazyLock;

        static ENV_VAR_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern compiles"));

        ENV_VAR_RE
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("site.name", &self.site.name)?;

        let layout = &self.layout;
        for section in &layout.sections {
            validate_non_empty_string("sections.id", &section.id)?;
            validate_non_negative("sections.top", section.top)?;
            validate_non_negative("sections.height", section.height)?;
        }
        validate_unique(
            "sections.id",
            layout.sections.iter().map(|s| s.id.as_str()),
        )?;

        if !layout.sections.is_empty() && layout.section(&layout.default_section).is_none() {
            return Err(SiteError::InvalidConfigValueError {
                field: "default_section".to_string(),
                value: layout.default_section.clone(),
                reason: "Default section is not declared in [[sections]]".to_string(),
            });
        }

        for section in &layout.sections {
            if let Some(form) = section.form {
                if layout.form(form).is_none() {
                    return Err(SiteError::MissingConfigError {
                        field: format!("forms ({} form used by section '{}')", form, section.id),
                    });
                }
            }
        }

        let mut kinds: Vec<FormKind> = layout.forms.iter().map(|f| f.kind).collect();
        kinds.sort();
        if kinds.windows(2).any(|w| w[0] == w[1]) {
            return Err(SiteError::InvalidConfigValueError {
                field: "forms.kind".to_string(),
                value: format!("{:?}", kinds),
                reason: "Each form kind may be declared once".to_string(),
            });
        }
        for form in &layout.forms {
            validate_unique(
                &format!("forms.{}.fields", form.kind),
                form.fields.iter().map(|f| f.name.as_str()),
            )?;
            if let Some(latency) = form.latency_ms {
                validate_positive_number(&format!("forms.{}.latency_ms", form.kind), latency, 1)?;
            }
        }

        if layout.carousel.slides > 1 {
            validate_positive_number("carousel.interval_ms", layout.carousel.interval_ms, 1)?;
        }

        validate_non_negative("geometry.header_height", layout.geometry.header_height)?;
        validate_non_negative("geometry.banner_height", layout.geometry.banner_height)?;
        validate_non_negative("geometry.viewport_height", layout.geometry.viewport_height)?;
        validate_positive_number(
            "timing.banner_visible_ms",
            layout.timing.banner_visible_ms,
            1,
        )?;

        Ok(())
    }

    pub fn site_name(&self) -> &str {
        &self.site.name
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
