//! Blender-side processing script.
//!
//! Blender can only be driven from Python, so the per-file work (open scene,
//! rename actions, export glTF, write report) is shipped as a generated
//! script. The template is a versioned constant and [`synthesize`] is the
//! only place that fills it in.
//!
//! The script's `convert_animation_name` must produce exactly what
//! [`crate::naming::NamingScheme::apply`] produces. The orchestrator checks the
//! returned report against the Rust converter and warns on drift.
//!
//! Arguments are read from the end of Blender's `sys.argv`:
//! `[..., "--", input_dir, output_dir, naming_scheme]`.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;
use crate::report::REPORT_FILE_NAME;

/// Bumped whenever the template's behaviour or argument contract changes.
pub const SCRIPT_TEMPLATE_VERSION: u32 = 1;

/// Native Blender scene extension, without the dot.
pub const SCENE_EXTENSION: &str = "blend";

/// Extension of the per-clip export files, without the dot.
pub const EXPORT_EXTENSION: &str = "gltf";

/// Python template. Placeholders are `@NAME@` tokens.
pub const SCRIPT_TEMPLATE: &str = r#"# Generated by blendbatch, template v@TEMPLATE_VERSION@. Do not edit.
import json
import sys
from pathlib import Path

import bpy

NOISE = ("Action", "action", ".001", ".000")


def segments(name):
    return [part for part in name.split("_") if part]


def convert_animation_name(blender_name, scheme):
    name = blender_name.strip().replace(" ", "_")
    for noise in NOISE:
        name = name.replace(noise, "")

    if scheme == "artist":
        return "Owen_" + "".join(p.capitalize() for p in segments(name))
    if scheme == "legacy":
        lower = name.lower()
        if not lower.endswith(("_l", "_s")):
            lower += "_l"
        return lower
    if scheme == "hierarchical":
        return "owen.state." + ".".join(segments(name.lower())) + ".loop"
    if scheme == "semantic":
        return "Owen" + "".join(p.capitalize() for p in segments(name)) + "Loop"
    return name


def process_file(filepath, output_dir, scheme):
    result = {"file": filepath, "animations": [], "errors": []}
    try:
        bpy.ops.wm.read_factory_settings(use_empty=True)
        bpy.ops.wm.open_mainfile(filepath=filepath)

        animated = [
            obj for obj in bpy.data.objects
            if obj.animation_data and obj.animation_data.action
        ]
        if not animated:
            result["errors"].append("No animated objects found")
            return result

        for obj in animated:
            action = obj.animation_data.action
            start, end = action.frame_range
            converted = convert_animation_name(action.name, scheme)
            exported = Path(output_dir) / (converted + ".@EXPORT_EXT@")

            bpy.ops.object.select_all(action="DESELECT")
            obj.select_set(True)
            bpy.context.view_layer.objects.active = obj
            bpy.ops.export_scene.gltf(
                filepath=str(exported),
                export_selected=True,
                export_animations=True,
                export_animation_mode="ACTIONS",
                export_nla_strips=False,
                export_frame_range=True,
                export_frame_step=1,
                export_custom_properties=True,
            )

            result["animations"].append({
                "object": obj.name,
                "action": action.name,
                "frame_start": int(start),
                "frame_end": int(end),
                "duration": end - start,
                "converted_name": converted,
                "exported_file": str(exported),
            })
            print("Exported animation: %s -> %s" % (action.name, converted))
    except Exception as exc:
        result["errors"].append(str(exc))
        print("Error processing %s: %s" % (filepath, exc))
    return result


def main():
    if len(sys.argv) < 4:
        print("usage: blender --background --python script.py -- input_dir output_dir scheme")
        sys.exit(1)

    input_dir, output_dir, scheme = sys.argv[-3:]
    Path(output_dir).mkdir(parents=True, exist_ok=True)
    scenes = sorted(Path(input_dir).glob("*.@SCENE_EXT@"))

    report = {
        "processed_files": [],
        "total_animations": 0,
        "total_files": len(scenes),
        "naming_scheme": scheme,
    }
    for scene in scenes:
        print("Processing: %s" % scene)
        result = process_file(str(scene), output_dir, scheme)
        report["processed_files"].append(result)
        report["total_animations"] += len(result["animations"])

    report_path = Path(output_dir) / "@REPORT_FILE@"
    with open(report_path, "w") as f:
        json.dump(report, f, indent=2)
    print("Processed %d animations from %d files." % (report["total_animations"], len(scenes)))


main()
"#;

/// Fill in the template.
pub fn synthesize() -> String {
    SCRIPT_TEMPLATE
        .replace("@TEMPLATE_VERSION@", &SCRIPT_TEMPLATE_VERSION.to_string())
        .replace("@SCENE_EXT@", SCENE_EXTENSION)
        .replace("@EXPORT_EXT@", EXPORT_EXTENSION)
        .replace("@REPORT_FILE@", REPORT_FILE_NAME)
}

/// Synthesized script on disk for the duration of one Blender run.
///
/// The file is deleted when this value is dropped, whichever way the run
/// ends.
#[derive(Debug)]
pub struct TempScript {
    file: NamedTempFile,
}

impl TempScript {
    /// Write the script to a fresh uniquely named file inside `dir`.
    pub fn create_in(dir: &Path) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("blendbatch_script_")
            .suffix(".py")
            .tempfile_in(dir)?;
        file.write_all(synthesize().as_bytes())?;
        file.flush()?;
        debug!(path = %file.path().display(), "wrote Blender script");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
