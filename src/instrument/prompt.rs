//! Master prompt for the instrumentation request

/// Placeholder replaced by the script under instrumentation.
const INPUT_SLOT: &str = "{input_code}";

/// Master template sent to the model. Asks for prospective provenance
/// (the plan: transformations and their input/output sets) followed by
/// retrospective provenance (tasks delimiting each code block, with
/// dependency pointers between them), and for code only in the reply.
const MASTER_TEMPLATE: &str = r#"You are a software engineer specialized in data provenance and the instrumentation of scientific workflows. Analyze the script below and insert the code needed to capture prospective and retrospective provenance, following the dataflow task/dataset pattern.

## Concepts
Prospective provenance describes the execution plan with Transformations and input/output Sets.
Retrospective provenance records the actual execution with Tasks and DataSets holding concrete values.
Each retrospective Task must reference its prospective Transformation by name.

## Instructions
1. Read the whole script and identify its main logical steps. Create one Transformation per step.
2. For each Transformation, define input and output Sets with attribute names and types. Only AttributeType.NUMERIC and AttributeType.FILE are supported.
3. Map each Transformation to a Task, using the transformation name.
4. Insert task.begin() and task.end() calls delimiting each original code block.
5. Capture the real input and output variables into DataSets and attach them with task.add_dataset().
6. When a Task consumes the result of an earlier Task, pass dependency=<earlier task> at creation.

## Task
Instrument the following script. Return only the complete instrumented code, with no explanations, preface, or extra commentary.

### INPUT:
```python
{input_code}
```

### OUTPUT:
"#;

/// Render the master prompt with the given source code in the slot.
pub fn render_prompt(input_code: &str) -> String {
    MASTER_TEMPLATE.replace(INPUT_SLOT, input_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_injects_code() {
        let rendered = render_prompt("x = 1 + 2");
        assert!(rendered.contains("x = 1 + 2"));
        assert!(!rendered.contains(INPUT_SLOT));
    }

    #[test]
    fn test_template_names_supported_types() {
        assert!(MASTER_TEMPLATE.contains("AttributeType.NUMERIC"));
        assert!(MASTER_TEMPLATE.contains("AttributeType.FILE"));
    }
}
