//! Document skeletons, one per framework.
//!
//! Rendered with trim_blocks and lstrip_blocks, so block tags on their own
//! line leave no trace. Body lines arrive fully escaped.

pub(crate) const ROBOT: &str = r#"*** Settings ***
Documentation    {{ description }}
{% for line in imports %}
{{ line }}
{% endfor %}

*** Test Cases ***
{{ test_name }}
    [Documentation]    {{ description }}
{% if tags %}
    [Tags]    {{ tags | join("    ") }}
{% endif %}
{% for line in lines %}
    {{ line }}
{% endfor %}
"#;

pub(crate) const PYTEST: &str = r#""""{{ module_doc }}"""
{% for line in imports %}
{{ line }}
{% endfor %}


{% for tag in tags %}
@pytest.mark.{{ tag }}
{% endfor %}
def {{ function_name }}():
    """{{ description }}"""
{% for line in lines %}
    {{ line }}
{% endfor %}
"#;

pub(crate) const GHERKIN: &str = r#"Feature: {{ suite_name }}
  {{ description }}

{% if tags %}
  {{ tags | join(" ") }}
{% endif %}
  Scenario: {{ test_name }}
{% for line in lines %}
    {{ line }}
{% endfor %}
"#;

pub(crate) const JUNIT: &str = r#"{% for line in imports %}
{{ line }}
{% endfor %}

/**
 * {{ description }}
 */
public class {{ class_name }} {

    @Test
    @DisplayName({{ display_name }})
{% for tag in tags %}
    @Tag({{ tag }})
{% endfor %}
    void {{ function_name }}() {
{% for line in lines %}
        {{ line }}
{% endfor %}
    }
}
"#;
