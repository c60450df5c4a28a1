use std::future::Future;
use std::path::Path;
use std::sync::Mutex;

use rtcpack_lib::execute::{ExecuteError, Invocation, Runner};

/// Stands in for depot_tools, GN and ninja. `ninja` "builds" by writing a
/// static library into the output directory it was given.
#[derive(Default)]
pub struct FakeToolchain {
  pub calls: Mutex<Vec<Invocation>>,
}

impl FakeToolchain {
  pub fn command_lines(&self) -> Vec<String> {
    self.calls.lock().unwrap().iter().map(Invocation::command_line).collect()
  }
}

impl Runner for FakeToolchain {
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<(), ExecuteError>> + Send {
    self.calls.lock().unwrap().push(invocation.clone());
    let result = match (invocation.program.as_str(), invocation.args.as_slice()) {
      ("fetch", _) => {
        let src = invocation.cwd.join("src");
        write(&src.join(".git/HEAD"), "ref: refs/heads/main\n");
        write(
          &src.join("modules/audio_processing/aec3/clockdrift_detector.h"),
          "class ClockdriftDetector {\n  size_t stability_counter_;\n};\n",
        );
        write(&src.join("base/profiler/stack_copier_signal.cc"), "#include <syscall.h>\n");
        write(&src.join("api/scoped_refptr.h"), "#pragma once\n");
        write(&src.join("rtc_base/checks.inc"), "// inc\n");
        Ok(())
      }
      ("ninja", [flag, out]) if flag == "-C" => {
        write(&Path::new(out).join("obj/libwebrtc.a"), "!<arch>\n");
        Ok(())
      }
      _ => Ok(()),
    };
    std::future::ready(result)
  }
}

pub fn write(path: &Path, contents: &str) {
  std::fs::create_dir_all(path.parent().unwrap()).unwrap();
  std::fs::write(path, contents).unwrap();
}
